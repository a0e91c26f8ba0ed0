use std::net::TcpListener;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use argh::FromArgs;

use holostitch::cloud::{ImageGeometry, RigidTransform};
use holostitch::pack::{FilterPolicy, PackOptions};
use holostitch::stream::{CameraSession, CapturedFrame, FrameSource, StreamError};

#[derive(FromArgs)]
/// Synthetic camera producer: serves packed point cloud frames on demand.
struct Args {
    /// port to listen on
    #[argh(option, default = "8000")]
    port: u16,

    /// number of packing worker threads
    #[argh(option, default = "1")]
    threads: usize,

    /// enable the spatial acceptance filter
    #[argh(switch)]
    filter: bool,

    /// use the lane-batched packing path
    #[argh(switch)]
    vectorized: bool,
}

/// A swaying colored grid standing in for a real depth sensor.
struct SyntheticGrid {
    width: usize,
    height: usize,
    phase: f32,
}

impl FrameSource for SyntheticGrid {
    fn capture(&mut self) -> Result<CapturedFrame, StreamError> {
        let (w, h) = (self.width, self.height);
        let mut vertices = Vec::with_capacity(w * h);
        let mut texcoords = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                let u = x as f32 / (w - 1) as f32;
                let v = y as f32 / (h - 1) as f32;
                let depth = 1.0 + 0.3 * (self.phase + u * 6.0).sin();
                vertices.push([(u - 0.5) * 2.0, (v - 0.5) * 1.5, depth]);
                texcoords.push([u, v]);
            }
        }

        let geometry = ImageGeometry {
            width: w,
            height: h,
            bytes_per_pixel: 3,
            stride_bytes: w * 3,
        };
        let mut pixels = Vec::with_capacity(geometry.required_bytes());
        for y in 0..h {
            for x in 0..w {
                pixels.push((x * 255 / w) as u8);
                pixels.push((y * 255 / h) as u8);
                pixels.push(128);
            }
        }

        self.phase += 0.05;
        Ok(CapturedFrame {
            vertices,
            texcoords,
            geometry,
            pixels,
        })
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = shutdown.clone();
    ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed))?;

    let options = PackOptions {
        filter: args.filter.then(FilterPolicy::default),
        vectorized: args.vectorized,
        workers: args.threads,
    };

    let listener = TcpListener::bind(("0.0.0.0", args.port))?;
    log::info!("camera node listening on port {}", args.port);

    while !shutdown.load(Ordering::Relaxed) {
        let (stream, peer) = listener.accept()?;
        log::info!("consumer connected from {peer}");

        let mut session = CameraSession::new(stream, RigidTransform::IDENTITY, options);
        let mut source = SyntheticGrid {
            width: 160,
            height: 120,
            phase: 0.0,
        };
        match session.serve(&mut source, &shutdown) {
            Ok(()) => log::info!("session with {peer} ended"),
            Err(e) => log::error!("session with {peer} failed: {e}"),
        }
    }

    Ok(())
}
