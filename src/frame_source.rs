//! FrameSource - Camera Capture Loop
//!
//! ## Responsibilities
//!
//! - Drive the camera at a fixed target rate on a dedicated OS thread
//! - Push every captured frame into the shared FrameBuffer
//! - Absorb per-frame capture failures so the loop never dies
//! - Release the camera deterministically on shutdown
//!
//! Capture runs for the lifetime of the process, independent of whether
//! classification or any viewer is active, so the buffer stays warm.

use crate::camera::CameraDevice;
use crate::frame_buffer::{Frame, FrameBuffer};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// Handle to the capture thread. Dropping it stops the loop and joins
/// the thread, which drops the camera and releases the device.
pub struct FrameSource {
    stop_flag: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl FrameSource {
    /// Spawn the capture loop. The camera moves onto the thread.
    pub fn spawn(camera: Box<dyn CameraDevice>, buffer: Arc<FrameBuffer>, fps: u32) -> Self {
        let stop_flag = Arc::new(AtomicBool::new(false));
        let thread_flag = Arc::clone(&stop_flag);
        let handle = std::thread::spawn(move || {
            capture_loop(camera, buffer, fps, thread_flag);
        });

        Self {
            stop_flag,
            handle: Some(handle),
        }
    }

    /// Stop the loop and wait for the camera to be released.
    /// Worst case this blocks for one capture plus one sleep interval.
    pub fn stop(&mut self) {
        self.stop_flag.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
            tracing::info!("Frame source stopped");
        }
    }
}

impl Drop for FrameSource {
    fn drop(&mut self) {
        self.stop();
    }
}

fn capture_loop(
    mut camera: Box<dyn CameraDevice>,
    buffer: Arc<FrameBuffer>,
    fps: u32,
    stop_flag: Arc<AtomicBool>,
) {
    let interval = Duration::from_secs_f64(1.0 / f64::from(fps.max(1)));
    tracing::info!(fps = fps, "Capture loop started");

    while !stop_flag.load(Ordering::Acquire) {
        match camera.capture_frame() {
            Ok(data) => {
                tracing::trace!(size = data.len(), "Captured frame");
                buffer.put(Frame::new(data));
            }
            Err(e) => {
                // Buffer keeps its last good frame
                tracing::warn!(error = %e, "Frame capture failed");
            }
        }

        std::thread::sleep(interval);
    }

    tracing::info!("Capture loop exiting");
    // Camera dropped here, releasing the device
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};

    struct CountingCamera {
        count: u8,
    }

    impl CameraDevice for CountingCamera {
        fn capture_frame(&mut self) -> Result<Vec<u8>> {
            self.count = self.count.wrapping_add(1);
            Ok(vec![self.count; 16])
        }
    }

    struct FlakyCamera {
        count: u8,
    }

    impl CameraDevice for FlakyCamera {
        fn capture_frame(&mut self) -> Result<Vec<u8>> {
            self.count = self.count.wrapping_add(1);
            if self.count % 2 == 0 {
                Err(Error::Camera("device timeout".to_string()))
            } else {
                Ok(vec![self.count; 16])
            }
        }
    }

    fn wait_for_frame(buffer: &FrameBuffer) -> bool {
        for _ in 0..200 {
            if buffer.has_frame() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        false
    }

    #[test]
    fn test_capture_loop_fills_buffer() {
        let buffer = Arc::new(FrameBuffer::new());
        let mut source = FrameSource::spawn(
            Box::new(CountingCamera { count: 0 }),
            Arc::clone(&buffer),
            100,
        );

        assert!(wait_for_frame(&buffer));
        source.stop();

        let frame = buffer.get().unwrap();
        assert_eq!(frame.data.len(), 16);
    }

    #[test]
    fn test_capture_failures_do_not_kill_loop() {
        let buffer = Arc::new(FrameBuffer::new());
        let mut source = FrameSource::spawn(
            Box::new(FlakyCamera { count: 0 }),
            Arc::clone(&buffer),
            100,
        );

        assert!(wait_for_frame(&buffer));
        source.stop();
        assert!(buffer.has_frame());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let buffer = Arc::new(FrameBuffer::new());
        let mut source = FrameSource::spawn(
            Box::new(CountingCamera { count: 0 }),
            Arc::clone(&buffer),
            100,
        );

        source.stop();
        source.stop();
    }
}
