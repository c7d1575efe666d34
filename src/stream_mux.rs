//! StreamMultiplexer - MJPEG Live View
//!
//! ## Responsibilities
//!
//! - Give each viewer an independent multipart chunk stream over the
//!   shared FrameBuffer
//! - Pace chunks at the client-facing rate, decoupled from capture
//! - Emit nothing while the buffer is empty, repeat frames when
//!   capture is slower than the viewing rate
//!
//! A stream is lazy and bound to its connection: dropping the response
//! body ends it.

use crate::frame_buffer::FrameBuffer;
use futures::future;
use futures::stream::{Stream, StreamExt};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tokio_stream::wrappers::IntervalStream;

/// Content type of the live view response
pub const CONTENT_TYPE: &str = "multipart/x-mixed-replace; boundary=frame";

const CHUNK_HEADER: &[u8] = b"--frame\r\nContent-Type: image/jpeg\r\n\r\n";

/// Frame one JPEG as a multipart chunk
fn chunk(frame_data: &[u8]) -> Vec<u8> {
    let mut chunk = Vec::with_capacity(CHUNK_HEADER.len() + frame_data.len() + 2);
    chunk.extend_from_slice(CHUNK_HEADER);
    chunk.extend_from_slice(frame_data);
    chunk.extend_from_slice(b"\r\n");
    chunk
}

/// Unbounded chunk stream for one viewer, re-reading the buffer on
/// every tick.
pub fn mjpeg_stream(
    buffer: Arc<FrameBuffer>,
    fps: u32,
) -> impl Stream<Item = Result<Vec<u8>, Infallible>> {
    let period = Duration::from_secs_f64(1.0 / f64::from(fps.max(1)));
    IntervalStream::new(interval(period)).filter_map(move |_| {
        let item = buffer.get().map(|frame| Ok(chunk(&frame.data)));
        future::ready(item)
    })
}
