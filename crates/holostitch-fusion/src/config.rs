use std::path::Path;

use serde::{Deserialize, Serialize};

use holostitch_cloud::RigidTransform;

use crate::error::FusionError;

/// One camera producer endpoint with its calibration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraEndpoint {
    /// Socket address of the producer, e.g. `192.168.1.128:8000`.
    pub addr: String,
    /// Row-major 4x4 rigid transform from this camera's frame to the world
    /// frame; the last row is `0 0 0 1`.
    pub transform: [[f32; 4]; 4],
}

impl CameraEndpoint {
    /// The calibration as a rigid transform.
    pub fn rigid_transform(&self) -> RigidTransform {
        RigidTransform::from(self.transform)
    }
}

fn default_downsample() -> usize {
    1
}

fn default_clean() -> bool {
    true
}

/// Static configuration of one fusion node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StitchConfig {
    /// Camera endpoints, in merge order.
    pub cameras: Vec<CameraEndpoint>,
    /// Keep every k-th point of each stream (1 keeps all).
    #[serde(default = "default_downsample")]
    pub downsample: usize,
    /// Clear the accumulator at the start of each cycle; `false` appends.
    #[serde(default = "default_clean")]
    pub clean: bool,
}

impl StitchConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self, FusionError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, FusionError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }
}
