mod app;
mod options;

use anyhow::Result;
use backdrop_core::Dispose;
use clap::Parser;
use std::path::PathBuf;
use winit::{dpi::LogicalSize, event::*, event_loop::EventLoop, window::WindowBuilder};

use app::App;
use options::FileConfig;

#[derive(Parser, Debug)]
#[command(about = "Cursor-reactive displaced image with a drifting particle cloud", version)]
struct Args {
    /// Image to display (PNG or JPEG); overrides imageSrc from --config
    image: Option<PathBuf>,
    /// TOML file with effect options and an optional [window] table
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for the field noise and point cloud
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let file = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    }
    .with_image(args.image.clone());
    file.effect.validate()?;

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(file.window.title.as_str())
        .with_inner_size(LogicalSize::new(file.window.width, file.window.height))
        .build(&event_loop)?;

    let mut app = Some(pollster::block_on(App::new(&window, file.effect, args.seed))?);

    event_loop.run(move |event, elwt| {
        if let Event::LoopExiting = event {
            if let Some(app) = app.take() {
                app.dispose();
            }
            return;
        }
        let Some(state) = app.as_mut() else {
            return;
        };
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::Resized(size) => state.resize(size),
                WindowEvent::CursorMoved { position, .. } => state.cursor_moved(position),
                WindowEvent::CursorLeft { .. } => state.cursor_left(),
                WindowEvent::CloseRequested => elwt.exit(),
                _ => {}
            },
            Event::AboutToWait => match state.render() {
                Ok(_) => state.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => state.reconfigure(),
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(e) => log::warn!("[app] surface error: {:?}", e),
            },
            _ => {}
        }
    })?;
    Ok(())
}
