use std::process::ExitCode;

use clap::Parser;
use tricolor::config::{init_logging, Cli};
use tricolor::prelude::*;

fn run(cli: &Cli) -> Result<()> {
    log::info!("Starting window");

    let config = cli.window_config();
    let mut window = SdlWindow::open(&config)?;
    prepare(&mut window, &config)?;

    let scene = cli.scene();
    let (exit_send, exit_recv) = exit_signal();
    let mut frame_loop = FrameLoop::new(exit_recv, KeyHandler::new(exit_send));

    let report = frame_loop.run(&mut window, scene.as_ref())?;
    log::info!("stopped after {} frames: {:?}", report.frames, report.exit);

    if let Some(path) = &cli.screenshot {
        window.context().snapshot().save(path)?;
        log::info!("saved last frame to {}", path.display());
    }

    window.close();
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
