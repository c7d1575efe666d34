//! Camera device abstraction
//!
//! ## Responsibilities
//!
//! - Define the blocking JPEG frame-source interface used by the capture loop
//! - Provide a synthetic test-pattern device for development and tests
//! - Provide a V4L2-backed device behind the `v4l2` feature

mod test_pattern;
#[cfg(feature = "v4l2")]
mod v4l2;

pub use test_pattern::TestPatternCamera;
#[cfg(feature = "v4l2")]
pub use v4l2::V4l2Camera;

use crate::error::{Error, Result};

/// A blocking source of encoded JPEG frames.
///
/// Implementations own the underlying device; dropping the value
/// releases it.
pub trait CameraDevice: Send {
    /// Capture one encoded JPEG frame. Blocks until the device
    /// produces the next frame.
    fn capture_frame(&mut self) -> Result<Vec<u8>>;
}

/// Open the camera selected by `source` ("test-pattern" or "v4l2").
///
/// Device acquisition failures here are fatal to startup, unlike
/// per-frame capture failures which the capture loop absorbs.
pub fn open_camera(
    source: &str,
    device: &str,
    width: u32,
    height: u32,
    fps: u32,
) -> Result<Box<dyn CameraDevice>> {
    tracing::info!(
        source = %source,
        device = %device,
        width = width,
        height = height,
        fps = fps,
        "Opening camera"
    );

    match source {
        "test-pattern" => Ok(Box::new(TestPatternCamera::new(width, height))),
        #[cfg(feature = "v4l2")]
        "v4l2" => Ok(Box::new(V4l2Camera::open(device, width, height, fps)?)),
        #[cfg(not(feature = "v4l2"))]
        "v4l2" => Err(Error::Camera(
            "camera source 'v4l2' requires building with the v4l2 feature".to_string(),
        )),
        other => Err(Error::Camera(format!("unknown camera source: {}", other))),
    }
}
