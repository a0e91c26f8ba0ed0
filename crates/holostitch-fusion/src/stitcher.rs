use std::io::{Read, Write};
use std::net::TcpStream;
use std::thread;

use holostitch_cloud::PointCloud;
use holostitch_stream::StreamClient;

use crate::config::StitchConfig;
use crate::error::FusionError;

/// Drives N camera streams concurrently and merges them deterministically.
///
/// One cycle fans out one blocking pull round trip per camera, joins at the
/// barrier, and concatenates the per-camera clouds in configuration order.
/// Any stream failure fails the whole cycle; a partial stitch is never
/// produced.
pub struct Stitcher<S> {
    clients: Vec<StreamClient<S>>,
    accumulator: PointCloud,
    clean: bool,
}

impl Stitcher<TcpStream> {
    /// Connect to every camera endpoint of the configuration.
    pub fn connect(config: &StitchConfig) -> Result<Self, FusionError> {
        let mut clients = Vec::with_capacity(config.cameras.len());
        for (i, camera) in config.cameras.iter().enumerate() {
            let client = StreamClient::connect(
                camera.addr.as_str(),
                camera.rigid_transform(),
                config.downsample,
            )
            .map_err(|source| FusionError::Camera { camera: i, source })?;
            clients.push(client);
        }
        log::info!("connected to {} camera streams", clients.len());
        Ok(Self::from_clients(clients, config.clean))
    }
}

impl<S: Read + Write + Send> Stitcher<S> {
    /// Build a stitcher over already-connected clients, in merge order.
    pub fn from_clients(clients: Vec<StreamClient<S>>, clean: bool) -> Self {
        Self {
            clients,
            accumulator: PointCloud::default(),
            clean,
        }
    }

    /// Number of camera streams.
    pub fn num_cameras(&self) -> usize {
        self.clients.len()
    }

    /// The current stitched cloud.
    pub fn stitched(&self) -> &PointCloud {
        &self.accumulator
    }

    /// Run one fusion cycle and return the stitched cloud.
    ///
    /// Each camera task owns its connection exclusively and shares nothing
    /// with its siblings; the scope join is the barrier. The merge order is
    /// fixed by camera index, independent of completion order.
    pub fn cycle(&mut self) -> Result<&PointCloud, FusionError> {
        if self.clean {
            self.accumulator.clear();
        }

        let results: Vec<Result<PointCloud, FusionError>> = thread::scope(|scope| {
            let handles: Vec<_> = self
                .clients
                .iter_mut()
                .map(|client| scope.spawn(move || client.fetch()))
                .collect();

            handles
                .into_iter()
                .enumerate()
                .map(|(camera, handle)| match handle.join() {
                    Ok(Ok(cloud)) => {
                        log::debug!("camera {camera} delivered {} points", cloud.len());
                        Ok(cloud)
                    }
                    Ok(Err(source)) => Err(FusionError::Camera { camera, source }),
                    Err(_) => Err(FusionError::WorkerPanic(camera)),
                })
                .collect()
        });

        // merge strictly in camera order after the barrier
        for result in results {
            let cloud = result?;
            self.accumulator.append(&cloud);
        }
        log::debug!("stitched cloud holds {} points", self.accumulator.len());
        Ok(&self.accumulator)
    }
}
