// What you SEE:
// • The camera feed after black/white thresholding, with each mask segment
//   painted black (hot) or white (cold).
// • The mask itself on top at low opacity; Space hides it (an outline stays).
// • WASD move, Left/Right rotate, Up/Down scale, J/L and I/K stretch one axis,
//   Shift for fine steps. ESC or closing the window quits and saves the pose.

use clap::Parser;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use thermomask::camera::{CameraCapture, FrameSource};
use thermomask::config::AppConfig;
use thermomask::draw::{Drawer, draw_quad_outline};
use thermomask::error::Error;
use thermomask::geometry::Pose;
use thermomask::pipeline::Pipeline;
use thermomask::raster::{blend_over, to_screen};
use thermomask::types::FrameBuffer;
use thermomask::{monitoring, persist};
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "Overlay a posable mask on a webcam and read segment temperatures")]
struct Args {
    /// TOML config file; ignored if it does not exist
    #[arg(short, long, default_value = "thermomask.toml")]
    config: PathBuf,
    /// Camera index or device path, overrides the config
    #[arg(short, long)]
    device: Option<String>,
}

fn main() {
    monitoring::init_logger();
    if let Err(e) = run(Args::parse()) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Error> {
    let mut cfg = AppConfig::load_or_default(&args.config)?;
    if let Some(device) = args.device {
        cfg.camera.device = device;
    }

    /* --- Mask texture + pose ---
       The pose file wins over defaults, including the base size. */
    let mask = image::open(&cfg.mask.path)
        .map_err(|source| Error::Image { path: cfg.mask.path.clone(), source })?
        .to_rgba8();
    let default_pose = Pose::new(mask.width() as f32, mask.height() as f32);
    let mut pose = persist::load_or(&cfg.mask.pose_path, default_pose);
    pose.clamp_scale();

    /* --- Camera + window setup --- */
    let mut cam = CameraCapture::new(&cfg.camera.device, cfg.camera.width, cfg.camera.height)?;
    let (w, h) = cam.resolution();
    let mut drawer = Drawer::new("camera", w as usize, h as usize)?;
    let mut screen = FrameBuffer::new(w as usize, h as usize);

    let pipeline = Pipeline::new(cfg.filter_chain(), cfg.detector());
    let mut mask_visible = true;

    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;

    /* ------------------------------ Main loop ------------------------------ */
    let result = loop {
        if !drawer.is_open() || drawer.quit_requested() {
            break Ok(());
        }

        /* 1) Inputs: discrete toggle, then held keys */
        if drawer.toggle_pressed() {
            mask_visible = !mask_visible;
        }
        drawer.controls().apply(&mut pose);

        /* 2) Fresh frame → filters → mask render → detection */
        let mut frame = match cam.next_frame() {
            Ok(frame) => frame,
            Err(e) => break Err(e),
        };
        let processed = match pipeline.process(&mut frame, &mask, &pose) {
            Ok(p) => p,
            Err(e) => break Err(e),
        };

        /* 3) Compose: frame, then mask overlay or its outline */
        to_screen(&frame, &mut screen);
        if mask_visible {
            blend_over(&mut screen, &processed.overlay, cfg.mask.opacity);
        } else {
            draw_quad_outline(&mut screen, &pose.quad(), 0x00_FF_CC_33);
        }

        if let Err(e) = drawer.present(&screen) {
            break Err(e);
        }

        /* 4) FPS + reading, once per second */
        frames_this_second += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            info!("FPS: {fps:.1} reading: {:.0}", processed.reading);
            frames_this_second = 0;
            last_fps_time = now;
        }
    };

    // Save whatever pose we ended on, even when the loop failed.
    match persist::save(&cfg.mask.pose_path, &pose) {
        Ok(()) => info!("saved pose to {}", cfg.mask.pose_path.display()),
        Err(e) => warn!("could not save pose: {e}"),
    }

    result
}
