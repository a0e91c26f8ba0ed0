//! Three synthetic camera producers, one fusion node and one downstream
//! consumer, wired over localhost sockets.

use std::net::{TcpListener, TcpStream};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::thread::JoinHandle;

use holostitch_cloud::{ImageGeometry, RigidTransform};
use holostitch_fusion::{StitchServer, Stitcher};
use holostitch_pack::PackOptions;
use holostitch_stream::{CameraSession, CapturedFrame, FrameSource, StreamClient, StreamError};
use holostitch_wire::{pull_frame, PullToken};

struct SinglePointSource {
    x: f32,
    rgb: [u8; 3],
}

impl FrameSource for SinglePointSource {
    fn capture(&mut self) -> Result<CapturedFrame, StreamError> {
        Ok(CapturedFrame {
            vertices: vec![[self.x, 0.0, 1.0]],
            texcoords: vec![[0.0, 0.0]],
            geometry: ImageGeometry {
                width: 1,
                height: 1,
                bytes_per_pixel: 3,
                stride_bytes: 3,
            },
            pixels: self.rgb.to_vec(),
        })
    }
}

fn spawn_camera(
    camera: usize,
    shutdown: Arc<AtomicBool>,
) -> (String, JoinHandle<Result<(), StreamError>>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind camera listener");
    let addr = listener.local_addr().expect("local addr").to_string();

    let handle = std::thread::spawn(move || {
        let (stream, _) = listener.accept().map_err(holostitch_wire::WireError::Io)?;
        let mut session =
            CameraSession::new(stream, RigidTransform::IDENTITY, PackOptions::default());
        let mut source = SinglePointSource {
            x: 0.1 * (camera as f32 + 1.0),
            rgb: [camera as u8; 3],
        };
        session.serve(&mut source, &shutdown)
    });

    (addr, handle)
}

#[test]
fn cameras_to_stitcher_to_downstream_consumer() {
    let shutdown = Arc::new(AtomicBool::new(false));

    let mut producers = Vec::new();
    let mut clients = Vec::new();
    for camera in 0..3 {
        let (addr, handle) = spawn_camera(camera, shutdown.clone());
        producers.push(handle);

        // each stream gets its own world offset along y
        let transform = RigidTransform {
            rotation: RigidTransform::IDENTITY.rotation,
            translation: [0.0, camera as f32, 0.0],
        };
        clients.push(StreamClient::connect(addr.as_str(), transform, 1).expect("connect"));
    }

    let mut stitcher = Stitcher::from_clients(clients, true);
    let stitched = stitcher.cycle().expect("fusion cycle");
    assert_eq!(stitched.len(), 3);
    for (camera, (point, color)) in stitched
        .points()
        .iter()
        .zip(stitched.colors().iter())
        .enumerate()
    {
        let expected_x = 0.1 * (camera as f32 + 1.0);
        assert!((point[0] - expected_x).abs() < 0.001);
        assert!((point[1] - camera as f32).abs() < 0.001);
        assert_eq!(*color, [camera as u8; 3]);
    }

    // a second cycle reuses the same connections
    let stitched = stitcher.cycle().expect("second fusion cycle");
    assert_eq!(stitched.len(), 3);

    // re-serve the stitched cloud downstream
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind downstream listener");
    let addr = listener.local_addr().expect("local addr");
    let consumer = std::thread::spawn(move || {
        let mut stream = TcpStream::connect(addr).expect("connect downstream");
        pull_frame(&mut stream, PullToken::PointsXyzRgb).expect("pull stitched frame")
    });

    let (accepted, _) = listener.accept().expect("accept downstream");
    let mut server = StitchServer::new(accepted);
    let sent = server.serve_once(stitcher.stitched()).expect("serve stitched");
    assert_eq!(sent, 3);

    let payload = consumer.join().expect("consumer thread");
    assert_eq!(payload.len(), 3 * 5);

    // dropping the stitcher closes the camera connections; producers exit
    // cleanly on disconnect
    drop(stitcher);
    for handle in producers {
        handle.join().expect("producer thread").expect("clean exit");
    }
}
