//! V4L2 camera capture via memory-mapped streaming.
//!
//! Requests MJPEG output from the device so captured buffers are
//! already JPEG-encoded and need no transcoding.

use crate::error::{Error, Result};
use v4l::buffer::Type;
use v4l::io::mmap::Stream as MmapStream;
use v4l::io::traits::CaptureStream;
use v4l::video::Capture;
use v4l::{Device, Format, FourCC};

/// Driver-side mmap buffer count
const BUFFER_COUNT: u32 = 4;

/// V4L2 camera device. Dropping it stops streaming and releases the
/// device handle.
pub struct V4l2Camera {
    stream: MmapStream<'static>,
    path: String,
}

impl V4l2Camera {
    /// Open and configure the device at `path` for MJPEG capture.
    pub fn open(path: &str, width: u32, height: u32, fps: u32) -> Result<Self> {
        let device = Device::with_path(path)
            .map_err(|e| Error::Camera(format!("open {} failed: {}", path, e)))?;

        let format = Format::new(width, height, FourCC::new(b"MJPG"));
        let format = Capture::set_format(&device, &format)
            .map_err(|e| Error::Camera(format!("set format on {} failed: {}", path, e)))?;
        if format.fourcc != FourCC::new(b"MJPG") {
            return Err(Error::Camera(format!(
                "{} does not support MJPEG output",
                path
            )));
        }

        let params = v4l::video::capture::Parameters::with_fps(fps);
        Capture::set_params(&device, &params)
            .map_err(|e| Error::Camera(format!("set frame rate on {} failed: {}", path, e)))?;

        let stream = MmapStream::with_buffers(&device, Type::VideoCapture, BUFFER_COUNT)
            .map_err(|e| Error::Camera(format!("mmap stream on {} failed: {}", path, e)))?;

        tracing::info!(
            path = %path,
            width = format.width,
            height = format.height,
            "V4L2 camera ready"
        );

        Ok(Self {
            stream,
            path: path.to_string(),
        })
    }
}

impl super::CameraDevice for V4l2Camera {
    fn capture_frame(&mut self) -> Result<Vec<u8>> {
        let (data, _metadata) = CaptureStream::next(&mut self.stream)
            .map_err(|e| Error::Camera(format!("capture on {} failed: {}", self.path, e)))?;
        // Buffer is only valid until the next dequeue
        Ok(data.to_vec())
    }
}
