//! Real-time playback of gesture scripts.

use std::time::{Duration, Instant};

use log::{debug, info, warn};
use tokio::task::JoinHandle;
use tokio::time::sleep;

use super::types::{GestureScript, ScriptGesture};
use crate::ghost::GhostCanvas;
use crate::replay::Point;

/// What happened during a playback run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackSummary {
    /// Gestures whose replay was scheduled
    pub replayed: usize,
    /// Gestures ended with fewer than two points
    pub skipped: usize,
    /// Gestures delivered as cancelled
    pub cancelled: usize,
    /// Clear actions performed
    pub clears: usize,
}

/// Feeds `script` into `ghost` with the script's real-time pacing.
///
/// Gestures are played one after another, each point delivered at its
/// recorded offset; clears fire on their own timeline. Returns once every
/// scheduled replay has drawn its final segment.
pub async fn play(script: &GestureScript, ghost: &mut GhostCanvas) -> PlaybackSummary {
    let mut summary = PlaybackSummary::default();

    let clear_task = spawn_clears(script, ghost);
    let mut replays: Vec<JoinHandle<()>> = Vec::new();

    for (index, gesture) in script.gestures.iter().enumerate() {
        sleep(Duration::from_secs_f64(gesture.start)).await;
        feed_gesture(ghost, gesture).await;

        if gesture.cancel {
            debug!("Cancelling gesture {}", index);
            ghost.gesture_cancelled();
            summary.cancelled += 1;
            continue;
        }

        match ghost.gesture_ended() {
            Some(handle) => {
                debug!("Gesture {} ended; replay scheduled", index);
                replays.push(handle);
                summary.replayed += 1;
            }
            None => {
                debug!("Gesture {} ended without a replay", index);
                summary.skipped += 1;
            }
        }
    }

    for replay in replays {
        if let Err(err) = replay.await {
            warn!("Replay task failed: {}", err);
        }
    }
    match clear_task.await {
        Ok(count) => summary.clears = count,
        Err(err) => warn!("Clear task failed: {}", err),
    }

    info!(
        "Playback finished: {} replayed, {} skipped, {} cancelled, {} clears",
        summary.replayed, summary.skipped, summary.cancelled, summary.clears
    );
    summary
}

async fn feed_gesture(ghost: &mut GhostCanvas, gesture: &ScriptGesture) {
    ghost.select_tool(gesture.tool);

    let began = Instant::now();
    let mut elapsed = 0.0_f64;
    for &[x, y, t] in &gesture.points {
        if t > elapsed {
            sleep(Duration::from_secs_f64(t - elapsed)).await;
            elapsed = t;
        }
        ghost.pointer_moved(Point::new(x, y), began + Duration::from_secs_f64(t));
    }

    if let Some(tool) = gesture.switch_to {
        ghost.select_tool(tool);
    }
}

fn spawn_clears(script: &GestureScript, ghost: &GhostCanvas) -> JoinHandle<usize> {
    let mut times: Vec<f64> = script.clears.iter().map(|clear| clear.at).collect();
    times.sort_by(f64::total_cmp);
    let canvas = ghost.canvas().clone();

    tokio::spawn(async move {
        let mut elapsed = 0.0_f64;
        let mut performed = 0;
        for at in times {
            sleep(Duration::from_secs_f64(at - elapsed)).await;
            elapsed = at;
            match canvas.clear() {
                Ok(()) => performed += 1,
                Err(err) => warn!("Scripted clear failed: {}", err),
            }
        }
        performed
    })
}
