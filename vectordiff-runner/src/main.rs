use clap::Parser;
use crossbeam_channel::{bounded, Receiver};
use serde_json::Value;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use std::time::{Duration, Instant};
use vectordiff_canvas::RecordingCanvas;
use vectordiff_config::{load_config, DimensionChoice};
use vectordiff_player::{Controller, DiffSink, SinkError};
use vectordiff_scene::DimensionId;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless VectorDiff playback runner", long_about = None)]
struct Args {
    /// Path to the playback configuration file
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,
}

/// Writes one pretty-printed VectorDiff document per frame to stdout,
/// newline-terminated and flushed.
struct StdioSink {
    stdout: io::Stdout,
}

impl StdioSink {
    fn new() -> Self {
        StdioSink {
            stdout: io::stdout(),
        }
    }
}

impl DiffSink for StdioSink {
    fn emit(&mut self, diff: &Value) -> Result<(), SinkError> {
        let data = serde_json::to_vec_pretty(diff)?;
        self.stdout.write_all(&data)?;
        self.stdout.write_all(b"\n")?;
        self.stdout.flush()?;
        Ok(())
    }
}

fn dimension_id(choice: DimensionChoice) -> DimensionId {
    match choice {
        DimensionChoice::OneD => DimensionId::Line,
        DimensionChoice::TwoD => DimensionId::Plane,
        DimensionChoice::ThreeD => DimensionId::Space,
        DimensionChoice::FourD => DimensionId::Spacetime,
        DimensionChoice::FiveD => DimensionId::Multiverse,
    }
}

fn shutdown_channel() -> Receiver<()> {
    let (tx, rx) = bounded(1);
    if let Err(e) = ctrlc::set_handler(move || {
        let _ = tx.try_send(());
    }) {
        eprintln!("Failed to install Ctrl+C handler: {}", e);
        process::exit(1);
    }
    rx
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    let config = match load_config(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            process::exit(1);
        }
    };
    log::info!("using configuration from {}", args.config.display());

    let canvas = RecordingCanvas::new(config.canvas.width, config.canvas.height);
    let mut controller = Controller::new(canvas, StdioSink::new());

    let initial = dimension_id(config.playback.initial_dimension);
    if let Err(e) = controller.switch_dimension(initial) {
        eprintln!("Failed to render initial frame: {}", e);
        process::exit(1);
    }
    if let Err(e) = controller.set_speed(config.playback.speed) {
        eprintln!("Failed to apply playback speed: {}", e);
        process::exit(1);
    }

    let shutdown = shutdown_channel();
    let frame_duration = Duration::from_secs_f64(1.0 / config.framerate as f64);
    log::info!(
        "playing dimension {} at {} FPS, speed {}x",
        initial,
        config.framerate,
        config.playback.speed
    );

    controller.play(Instant::now());
    loop {
        let frame_start = Instant::now();

        if shutdown.try_recv().is_ok() {
            log::info!("interrupted, stopping playback");
            controller.pause();
            break;
        }
        if let Some(limit) = config.playback.duration_seconds {
            if controller.current_time() >= limit {
                log::info!("reached configured duration of {}s", limit);
                controller.pause();
                break;
            }
        }

        match controller.tick(frame_start) {
            Ok(true) => {
                let commands = controller.canvas_mut().take_commands();
                log::debug!(
                    "frame at t={:.3}: {} draw commands",
                    controller.current_time(),
                    commands.len()
                );
            }
            Ok(false) => break, // paused externally, nothing left to drive
            Err(e) => {
                eprintln!("Playback error: {}", e);
                process::exit(1);
            }
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_duration {
            spin_sleep::sleep(frame_duration - elapsed);
        } else {
            log::warn!(
                "frame time exceeded budget: {:?} > {:?}",
                elapsed,
                frame_duration
            );
        }
    }
}
