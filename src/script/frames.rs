//! Writing published snapshots to numbered PNG files.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

use crate::canvas::CanvasError;
use crate::draw::CanvasSnapshot;

/// Records every snapshot it observes as `frame-NNNNN.png`.
///
/// Snapshots published faster than they can be written are coalesced by the
/// watch channel, so the frame count is a lower bound on publish count.
pub struct FrameRecorder {
    stop: oneshot::Sender<()>,
    task: JoinHandle<Result<usize, CanvasError>>,
}

/// Filename for the `index`-th frame.
pub fn frame_filename(index: usize) -> String {
    format!("frame-{:05}.png", index)
}

impl FrameRecorder {
    /// Creates `directory` if needed and starts recording on the current runtime.
    pub fn start(
        mut receiver: watch::Receiver<Option<CanvasSnapshot>>,
        directory: &Path,
    ) -> Result<Self, CanvasError> {
        if !directory.exists() {
            info!("Creating frames directory: {}", directory.display());
            fs::create_dir_all(directory)?;
        }
        let directory = directory.to_path_buf();
        let (stop, mut stop_rx) = oneshot::channel();

        // Anything already published is not a frame of this run.
        receiver.mark_unchanged();

        let task = tokio::spawn(async move {
            let mut written = 0;
            loop {
                tokio::select! {
                    changed = receiver.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let snapshot = receiver.borrow_and_update().clone();
                        if let Some(snapshot) = snapshot {
                            written += 1;
                            write_frame(&directory, written, &snapshot)?;
                        }
                    }
                    _ = &mut stop_rx => {
                        if receiver.has_changed().unwrap_or(false) {
                            let snapshot = receiver.borrow_and_update().clone();
                            if let Some(snapshot) = snapshot {
                                written += 1;
                                write_frame(&directory, written, &snapshot)?;
                            }
                        }
                        break;
                    }
                }
            }
            Ok(written)
        });

        Ok(Self { stop, task })
    }

    /// Stops recording and returns how many frames were written.
    pub async fn finish(self) -> Result<usize, CanvasError> {
        if self.stop.send(()).is_err() {
            debug!("Frame recorder already stopped");
        }
        match self.task.await {
            Ok(result) => result,
            Err(err) => {
                warn!("Frame recorder task failed: {}", err);
                Err(CanvasError::Closed)
            }
        }
    }
}

fn write_frame(directory: &Path, index: usize, snapshot: &CanvasSnapshot) -> Result<PathBuf, CanvasError> {
    let path = directory.join(frame_filename(index));
    snapshot.write_png(&path)?;
    debug!("Wrote frame {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{CanvasHandle, CanvasPublisher, SurfaceConfig};
    use crate::draw::{LIGHT_GRAY, RED};
    use crate::replay::Point;

    #[test]
    fn frame_names_are_zero_padded() {
        assert_eq!(frame_filename(1), "frame-00001.png");
        assert_eq!(frame_filename(123456), "frame-123456.png");
    }

    #[tokio::test]
    async fn records_published_snapshots() {
        let dir = tempfile::tempdir().unwrap();
        let frames = dir.path().join("frames");
        let canvas = CanvasHandle::spawn(CanvasPublisher::new()).unwrap();

        let recorder = FrameRecorder::start(canvas.publisher().subscribe(), &frames).unwrap();
        canvas
            .initialize(SurfaceConfig::for_container(20.0, 20.0, 1.0, LIGHT_GRAY, 2.0))
            .await
            .unwrap();
        canvas
            .stroke_segment(Point::new(0.0, 10.0), Point::new(20.0, 10.0), RED)
            .unwrap();
        // wait until the canvas thread has run both commands
        canvas.snapshot().await.unwrap();

        let written = recorder.finish().await.unwrap();
        assert!(written >= 1);
        assert!(frames.join(frame_filename(1)).exists());
        assert!(!frames.join(frame_filename(written + 1)).exists());
        canvas.shutdown();
    }

    #[tokio::test]
    async fn nothing_published_means_no_frames() {
        let dir = tempfile::tempdir().unwrap();
        let publisher = CanvasPublisher::new();
        let recorder = FrameRecorder::start(publisher.subscribe(), dir.path()).unwrap();

        assert_eq!(recorder.finish().await.unwrap(), 0);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
