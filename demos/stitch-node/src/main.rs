use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use argh::FromArgs;

use holostitch::fusion::{StitchConfig, StitchServer, Stitcher};

#[derive(FromArgs)]
/// Fusion node: stitches N camera streams and re-serves the merged cloud.
struct Args {
    /// path to the stitch configuration JSON
    #[argh(option)]
    config: PathBuf,

    /// address to serve the stitched stream on
    #[argh(option, default = "String::from(\"0.0.0.0:9000\")")]
    listen: String,

    /// override the configured downsample factor
    #[argh(option)]
    downsample: Option<usize>,

    /// accumulate across cycles instead of clearing each cycle
    #[argh(switch)]
    append: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = shutdown.clone();
    ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed))?;

    let mut config = StitchConfig::from_path(&args.config)?;
    if let Some(downsample) = args.downsample {
        config.downsample = downsample;
    }
    if args.append {
        config.clean = false;
    }
    log::info!(
        "stitching {} cameras, downsample {}, clean {}",
        config.cameras.len(),
        config.downsample,
        config.clean
    );

    let mut stitcher = Stitcher::connect(&config)?;

    let listener = TcpListener::bind(args.listen.as_str())?;
    log::info!("serving stitched stream on {}", args.listen);

    while !shutdown.load(Ordering::Relaxed) {
        let (stream, peer) = listener.accept()?;
        log::info!("viewer connected from {peer}");

        let mut server = StitchServer::new(stream);
        match server.run(&mut stitcher, &shutdown) {
            Ok(()) => log::info!("viewer session with {peer} ended"),
            Err(e) => {
                log::error!("fusion loop failed: {e}");
                return Err(e.into());
            }
        }
    }

    Ok(())
}
