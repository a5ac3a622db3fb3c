use std::time::Duration;

use super::*;
use crate::draw::{BLUE, LIGHT_GRAY, RED};
use crate::replay::{Point, SegmentSink};

const GRAY: [u8; 4] = [170, 170, 170, 255];
const RED_PX: [u8; 4] = [255, 0, 0, 255];

fn surface_config(width: i32, height: i32) -> SurfaceConfig {
    SurfaceConfig {
        pixel_width: width,
        pixel_height: height,
        display_scale: 1.0,
        background: LIGHT_GRAY,
        line_width: 8.0,
        generation: 0,
    }
}

fn spawn_canvas() -> CanvasHandle {
    CanvasHandle::spawn(CanvasPublisher::new()).expect("canvas thread starts")
}

#[tokio::test]
async fn snapshot_before_initialize_is_empty() {
    let canvas = spawn_canvas();
    canvas.clear().unwrap();
    canvas
        .stroke_segment(Point::new(0.0, 0.0), Point::new(10.0, 10.0), RED)
        .unwrap();

    assert!(canvas.snapshot().await.unwrap().is_none());
    assert!(canvas.publisher().latest().is_none());
    canvas.shutdown();
}

#[tokio::test]
async fn commands_execute_in_order() {
    let canvas = spawn_canvas();
    let generation = canvas.initialize(surface_config(80, 60)).await.unwrap();
    assert_eq!(generation, 1);

    canvas
        .stroke_segment(Point::new(10.0, 30.0), Point::new(70.0, 30.0), RED)
        .unwrap();
    let snapshot = canvas.snapshot().await.unwrap().unwrap();
    assert_eq!((snapshot.width(), snapshot.height()), (80, 60));
    assert_eq!(snapshot.pixel(40, 30), Some(RED_PX));

    canvas.clear().unwrap();
    let cleared = canvas.snapshot().await.unwrap().unwrap();
    assert!(cleared.is_uniform(GRAY));

    // initialize, stroke and clear each published once
    assert_eq!(canvas.publisher().publish_count(), 3);
    assert_eq!(canvas.publisher().latest(), Some(cleared));
    canvas.shutdown();
}

#[tokio::test]
async fn initialize_rejects_bad_dimensions_without_bumping_generation() {
    let canvas = spawn_canvas();
    assert!(matches!(
        canvas.initialize(surface_config(-1, 10)).await,
        Err(CanvasError::InvalidDimensions { .. })
    ));
    assert_eq!(canvas.current_generation(), 0);
    canvas.shutdown();
}

#[tokio::test]
async fn segments_from_previous_surface_are_dropped() {
    let canvas = spawn_canvas();
    let old = canvas.initialize(surface_config(50, 50)).await.unwrap();
    let new = canvas.initialize(surface_config(40, 40)).await.unwrap();
    assert!(new > old);

    canvas.draw_segment(old, Point::new(0.0, 20.0), Point::new(40.0, 20.0), RED);
    let snapshot = canvas.snapshot().await.unwrap().unwrap();
    assert!(snapshot.is_uniform(GRAY));

    canvas.draw_segment(new, Point::new(0.0, 20.0), Point::new(40.0, 20.0), BLUE);
    let snapshot = canvas.snapshot().await.unwrap().unwrap();
    assert_eq!(snapshot.pixel(20, 20), Some([0, 0, 255, 255]));
    canvas.shutdown();
}

#[tokio::test]
async fn observers_are_notified_per_segment() {
    let canvas = spawn_canvas();
    let mut receiver = canvas.publisher().subscribe();
    canvas.initialize(surface_config(40, 40)).await.unwrap();

    tokio::time::timeout(Duration::from_secs(5), receiver.changed())
        .await
        .expect("initialize publishes")
        .unwrap();
    assert!(receiver.borrow_and_update().as_ref().unwrap().is_uniform(GRAY));

    canvas
        .stroke_segment(Point::new(0.0, 20.0), Point::new(40.0, 20.0), RED)
        .unwrap();
    tokio::time::timeout(Duration::from_secs(5), receiver.changed())
        .await
        .expect("stroke publishes")
        .unwrap();
    let latest = receiver.borrow_and_update().clone().unwrap();
    assert_eq!(latest.pixel(20, 20), Some(RED_PX));
    canvas.shutdown();
}

#[tokio::test]
async fn handle_reports_closed_after_shutdown() {
    let canvas = spawn_canvas();
    canvas.shutdown();
    assert!(matches!(canvas.snapshot().await, Err(CanvasError::Closed)));
}

#[tokio::test]
async fn generation_only_advances_once_the_surface_exists() {
    let canvas = spawn_canvas();
    assert_eq!(canvas.initialize(surface_config(40, 40)).await.unwrap(), 1);
    assert_eq!(canvas.current_generation(), 1);

    assert!(matches!(
        canvas.initialize(surface_config(40_000, 40)).await,
        Err(CanvasError::InvalidDimensions { .. })
    ));
    canvas.shutdown();
    assert!(matches!(
        canvas.initialize(surface_config(30, 30)).await,
        Err(CanvasError::Closed)
    ));
    assert_eq!(canvas.current_generation(), 1);
}
