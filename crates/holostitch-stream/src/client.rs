use std::io::{Read, Write};
use std::net::{TcpStream, ToSocketAddrs};

use holostitch_cloud::{PointCloud, RigidTransform};
use holostitch_pack::decode_points;
use holostitch_wire::{pull_frame, PullToken};

use crate::error::StreamError;

/// Consumer side of one persistent producer connection.
///
/// Each fetch is one pull exchange: send the token, block for one frame,
/// dequantize, subsample and map into the world frame with the connection's
/// fixed rigid transform. The connection is exclusively owned and released
/// when the client drops.
pub struct StreamClient<S> {
    stream: S,
    transform: RigidTransform,
    subsample: usize,
}

impl StreamClient<TcpStream> {
    /// Connect to a producer endpoint.
    pub fn connect<A: ToSocketAddrs + std::fmt::Debug>(
        addr: A,
        transform: RigidTransform,
        subsample: usize,
    ) -> Result<Self, StreamError> {
        let stream = TcpStream::connect(&addr).map_err(holostitch_wire::WireError::Io)?;
        log::info!("connected to producer at {addr:?}");
        Ok(Self::from_stream(stream, transform, subsample))
    }
}

impl<S: Read + Write> StreamClient<S> {
    /// Wrap an already-connected stream.
    pub fn from_stream(stream: S, transform: RigidTransform, subsample: usize) -> Self {
        Self {
            stream,
            transform,
            subsample: subsample.max(1),
        }
    }

    /// The fixed per-connection transform into the world frame.
    pub fn transform(&self) -> &RigidTransform {
        &self.transform
    }

    /// Pull one frame and return it as a world-space point cloud.
    pub fn fetch(&mut self) -> Result<PointCloud, StreamError> {
        let slots = pull_frame(&mut self.stream, PullToken::PointsXyzRgb)?;
        let (mut points, colors) = decode_points(&slots, self.subsample);
        self.transform.apply_in_place(&mut points);
        Ok(PointCloud::new(points, colors)?)
    }
}
