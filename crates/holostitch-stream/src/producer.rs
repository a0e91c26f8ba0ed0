use std::io::{Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use holostitch_cloud::{ColorImage, ImageGeometry, RigidTransform};
use holostitch_pack::{pack_points, PackOptions, PACKED_STRIDE};
use holostitch_wire::{read_pull, write_frame, PullToken, WireError};

use crate::error::StreamError;

/// One captured sensor frame: points, index-aligned texcoords and the color
/// image they sample.
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    /// Camera-local points in meters.
    pub vertices: Vec<[f32; 3]>,
    /// Normalized texture coordinates, index-aligned with `vertices`.
    pub texcoords: Vec<[f32; 2]>,
    /// Geometry of the color buffer.
    pub geometry: ImageGeometry,
    /// Row-major color bytes.
    pub pixels: Vec<u8>,
}

/// Supplier of per-frame geometry.
///
/// Acquiring depth and color from a physical sensor lives behind this trait;
/// the session only consumes the already-computed triple.
pub trait FrameSource {
    /// Capture the current frame.
    fn capture(&mut self) -> Result<CapturedFrame, StreamError>;
}

/// Producer side of one connection: replies to each pull with one frame.
///
/// The session exclusively owns its connection and its cached geometry; the
/// geometry of the first observed frame persists for the life of the
/// connection (later frames are validated against it). This replaces the
/// original pipeline's process-wide cached globals.
pub struct CameraSession<S> {
    stream: S,
    transform: RigidTransform,
    options: PackOptions,
    geometry: Option<ImageGeometry>,
    scratch: Vec<i16>,
}

impl<S: Read + Write> CameraSession<S> {
    /// Create a session over a connected stream.
    pub fn new(stream: S, transform: RigidTransform, options: PackOptions) -> Self {
        Self {
            stream,
            transform,
            options,
            geometry: None,
            scratch: Vec::new(),
        }
    }

    /// The geometry cached from the first served frame, if any.
    pub fn cached_geometry(&self) -> Option<ImageGeometry> {
        self.geometry
    }

    /// Block for one pull token and answer it with exactly one frame.
    ///
    /// Returns the number of packed points sent.
    pub fn serve_once<F: FrameSource>(&mut self, source: &mut F) -> Result<usize, StreamError> {
        let token = read_pull(&mut self.stream)?;
        if token != PullToken::PointsXyzRgb {
            return Err(StreamError::Unsupported(token));
        }

        let frame = source.capture()?;
        let geometry = *self.geometry.get_or_insert(frame.geometry);
        let image = ColorImage::new(geometry, &frame.pixels)?;

        let required = frame.vertices.len() * PACKED_STRIDE;
        if self.scratch.len() < required {
            self.scratch.resize(required, 0);
        }

        let report = pack_points(
            &frame.vertices,
            &frame.texcoords,
            &image,
            &self.transform,
            &self.options,
            &mut self.scratch,
        )?;

        write_frame(
            &mut self.stream,
            &self.scratch[..report.points * PACKED_STRIDE],
        )?;
        Ok(report.points)
    }

    /// Serve pulls until the consumer disconnects, a fatal error occurs, or
    /// the shutdown flag is raised.
    ///
    /// A clean disconnect while waiting for a token ends the loop without
    /// error. The flag is checked between exchanges.
    pub fn serve<F: FrameSource>(
        &mut self,
        source: &mut F,
        shutdown: &AtomicBool,
    ) -> Result<(), StreamError> {
        while !shutdown.load(Ordering::Relaxed) {
            match self.serve_once(source) {
                Ok(points) => log::debug!("served frame with {points} points"),
                Err(StreamError::Wire(WireError::ConnectionClosed)) => {
                    log::info!("consumer disconnected");
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }
        log::info!("session shut down");
        Ok(())
    }
}
