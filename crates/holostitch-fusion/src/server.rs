use std::io::{Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use holostitch_cloud::PointCloud;
use holostitch_pack::{encode_cloud, PACKED_STRIDE};
use holostitch_wire::{read_pull, write_frame, PullToken, WireError};

use crate::error::FusionError;
use crate::stitcher::Stitcher;

/// Serves stitched clouds to one downstream consumer, one frame per pull.
///
/// The stitched cloud is re-packed with the dense, unfiltered encoding; the
/// per-camera transforms were already applied upstream.
pub struct StitchServer<S> {
    stream: S,
    scratch: Vec<i16>,
}

impl<S: Read + Write> StitchServer<S> {
    /// Create a server over an accepted downstream connection.
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            scratch: Vec::new(),
        }
    }

    /// Answer one already-received pull with the given cloud.
    fn respond(&mut self, cloud: &PointCloud) -> Result<usize, FusionError> {
        let required = cloud.len() * PACKED_STRIDE;
        if self.scratch.len() < required {
            self.scratch.resize(required, 0);
        }
        let points = encode_cloud(cloud.points(), cloud.colors(), &mut self.scratch);
        write_frame(&mut self.stream, &self.scratch[..points * PACKED_STRIDE])?;
        Ok(points)
    }

    /// Block for one pull token and answer it with the given cloud.
    pub fn serve_once(&mut self, cloud: &PointCloud) -> Result<usize, FusionError> {
        let token = read_pull(&mut self.stream)?;
        if token != PullToken::PointsXyzRgb {
            return Err(FusionError::Unsupported(token));
        }
        self.respond(cloud)
    }

    /// Drive the fusion loop: one stitching cycle per downstream pull.
    ///
    /// Ends cleanly when the consumer disconnects or the shutdown flag is
    /// raised (checked between exchanges); any cycle or protocol failure is
    /// fatal and surfaced to the caller.
    pub fn run<S2: Read + Write + Send>(
        &mut self,
        stitcher: &mut Stitcher<S2>,
        shutdown: &AtomicBool,
    ) -> Result<(), FusionError> {
        while !shutdown.load(Ordering::Relaxed) {
            let token = match read_pull(&mut self.stream) {
                Ok(token) => token,
                Err(WireError::ConnectionClosed) => {
                    log::info!("downstream consumer disconnected");
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };
            if token != PullToken::PointsXyzRgb {
                return Err(FusionError::Unsupported(token));
            }

            let cloud = stitcher.cycle()?;
            log::debug!("serving stitched frame with {} points", cloud.len());
            self.respond(cloud)?;
        }
        log::info!("stitch server shut down");
        Ok(())
    }
}
