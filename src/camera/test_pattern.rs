//! Synthetic camera producing an animated color-band pattern.
//!
//! Lets the server and tests run without any capture hardware.

use crate::error::{Error, Result};
use image::{codecs::jpeg::JpegEncoder, ImageBuffer, Rgb};

use super::CameraDevice;

/// Band colors cycled across the frame.
const BANDS: [[u8; 3]; 5] = [
    [196, 30, 58],
    [255, 225, 53],
    [237, 145, 33],
    [120, 190, 33],
    [90, 60, 160],
];

/// Test-pattern camera. Each captured frame shifts the bands one step
/// so the live view visibly animates.
pub struct TestPatternCamera {
    width: u32,
    height: u32,
    tick: u64,
}

impl TestPatternCamera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(16),
            height: height.max(16),
            tick: 0,
        }
    }
}

impl CameraDevice for TestPatternCamera {
    fn capture_frame(&mut self) -> Result<Vec<u8>> {
        let shift = (self.tick.wrapping_mul(4) % u64::from(self.width)) as u32;
        self.tick = self.tick.wrapping_add(1);

        let band_width = (self.width / BANDS.len() as u32).max(1);
        let height = self.height;
        let img: ImageBuffer<Rgb<u8>, Vec<u8>> =
            ImageBuffer::from_fn(self.width, self.height, |x, y| {
                let band = (((x + shift) / band_width) as usize) % BANDS.len();
                let [r, g, b] = BANDS[band];
                let shade = (y * 64 / height) as u8;
                Rgb([
                    r.saturating_sub(shade),
                    g.saturating_sub(shade),
                    b.saturating_sub(shade),
                ])
            });

        let mut buf = Vec::new();
        JpegEncoder::new(&mut buf)
            .encode_image(&img)
            .map_err(|e| Error::Camera(format!("test pattern encode failed: {}", e)))?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_produces_decodable_jpeg() {
        let mut camera = TestPatternCamera::new(64, 48);
        let bytes = camera.capture_frame().unwrap();

        // JPEG SOI marker
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);

        let img = image::load_from_memory(&bytes).unwrap();
        assert_eq!(img.width(), 64);
        assert_eq!(img.height(), 48);
    }

    #[test]
    fn test_consecutive_frames_animate() {
        let mut camera = TestPatternCamera::new(64, 48);
        let first = camera.capture_frame().unwrap();
        let second = camera.capture_frame().unwrap();
        assert_ne!(first, second);
    }
}
