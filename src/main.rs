// What you SEE:
// • The image you passed on the command line, stretched to an 800x800 canvas.
// • Left click adds a red point; a green closed curve follows your points.
// • Z removes the last point. M switches straight legs <-> smooth Bézier.
// • Enter saves <image>_label.png (white inside the curve, native size). ESC quits.

mod config;
mod coords;
mod curve;
mod draw;
mod error;
mod export;
mod points;
mod raster;
mod session;
mod source;
mod types;

use clap::Parser;
use config::{Args, Config};
use draw::{compose_preview, Drawer};
use error::Error;
use export::{label_path, PngWriter};
use log::{error, info};
use session::{handle, Effect, Phase, Session};
use std::time::Duration;

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let config = Config::default();

    /* --- Load the source image ---
       Visual: nothing yet; a bad path stops here before any window opens. */
    let source = source::load(&args.image, (config.working_width, config.working_height))?;
    let (ow, oh) = source.space.original_size();
    let (sx, sy) = source.space.scale();
    info!("Loaded {} ({}x{}, scale {:.3} x {:.3})", args.image.display(), ow, oh, sx, sy);

    /* --- Session + window ---
       Visual: window opens showing the image with no points. */
    let mut session = Session::new(source.space, label_path(&args.image, &config.label_suffix), &config);
    info!("Label will be written to {}", session.label_path().display());
    let mut writer = PngWriter;
    let mut drawer = Drawer::new(
        "Contour Label",
        config.working_width as usize,
        config.working_height as usize,
    )?;

    let redraw = |session: &Session| {
        compose_preview(
            &source.background,
            session.anchors(),
            session.curve(),
            session.mode(),
            session.saved(),
            config.anchor_radius,
            config.stroke_width,
        )
    };
    drawer.present(&redraw(&session))?;

    /* ------------------------------ Main loop ------------------------------
       Visual: after Enter the status line reads SAVED until the next edit. */
    while session.phase() == Phase::Editing {
        let mut dirty = false;

        // Each command runs to completion before the next one is looked at.
        for command in drawer.poll_commands() {
            match handle(&mut session, command, &mut writer) {
                Ok(Effect::Redraw) | Ok(Effect::Saved { .. }) => dirty = true,
                Ok(Effect::Nothing) | Ok(Effect::Exit) => {}
                // A failed save keeps the points; the operator can retry.
                Err(e) => error!("{e}"),
            }
        }

        if session.phase() == Phase::Closed {
            break;
        }
        if dirty {
            drawer.present(&redraw(&session))?;
        } else {
            drawer.idle();
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    info!("Session closed");
    Ok(())
}
