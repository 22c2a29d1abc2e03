//! Command line options and logging setup.

use std::num::NonZeroU32;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::mesh::{Coloring, Mesh};
use crate::renderable::{ColoredTriangle, Renderable};
use crate::window::{WindowConfig, WINDOW_TITLE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SceneKind {
    /// Corners and colors written straight into the draw call.
    Triangle,
    /// The same triangle held in a mesh.
    #[default]
    Mesh,
}

#[derive(Debug, Parser)]
#[command(version, about = "Draws a colored triangle until Escape is pressed")]
pub struct Cli {
    #[arg(long, value_enum, default_value_t = SceneKind::default())]
    pub scene: SceneKind,
    #[arg(long, short = 'W', default_value = "256")]
    pub width: NonZeroU32,
    #[arg(long, short = 'H', default_value = "256")]
    pub height: NonZeroU32,
    /// Depth buffer bits: 0, 16, 24 or 32.
    #[arg(long, default_value_t = 0)]
    pub depth_bits: u8,
    /// Refresh periods per frame; 0 presents as fast as possible.
    #[arg(long, default_value_t = 1)]
    pub swap_interval: u32,
    #[arg(long, default_value = WINDOW_TITLE)]
    pub title: String,
    /// Draw mesh vertices in their own colors instead of plain red.
    #[arg(long)]
    pub vertex_colors: bool,
    /// Write the last presented frame to this PNG on exit.
    #[arg(long, value_name = "PATH")]
    pub screenshot: Option<PathBuf>,
    /// Log filter in `RUST_LOG` syntax, e.g. `debug` or `tricolor=trace`.
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,
}

impl Cli {
    pub fn window_config(&self) -> WindowConfig {
        WindowConfig {
            width: self.width.get(),
            height: self.height.get(),
            depth_bits: self.depth_bits,
            title: self.title.clone(),
            swap_interval: self.swap_interval,
            ..WindowConfig::default()
        }
    }

    pub fn coloring(&self) -> Coloring {
        if self.vertex_colors {
            Coloring::PerVertex
        } else {
            Coloring::default()
        }
    }

    pub fn scene(&self) -> Box<dyn Renderable> {
        match self.scene {
            SceneKind::Triangle => Box::new(ColoredTriangle),
            SceneKind::Mesh => {
                let mesh = Mesh::triangle().with_coloring(self.coloring());
                for vertex in mesh.vertices() {
                    log::debug!("mesh vertex {vertex}");
                }
                Box::new(mesh)
            }
        }
    }
}

/// Initializes `env_logger`, defaulting to `info` when `RUST_LOG` is unset.
///
/// An explicit filter overrides the environment.
pub fn init_logging(filters: Option<&str>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(filters) = filters {
        builder.parse_filters(filters);
    }
    if builder.try_init().is_err() {
        log::warn!("logger already initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::{Command, RecordingContext};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tricolor").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_open_the_classic_window() {
        let cli = parse(&[]);
        assert_eq!(cli.scene, SceneKind::Mesh);
        assert_eq!(cli.window_config(), WindowConfig::default());
        assert_eq!(cli.coloring(), Coloring::Flat(crate::color::Color::RED));
    }

    #[test]
    fn options_flow_into_window_config() {
        let cli = parse(&["-W", "800", "-H", "600", "--depth-bits", "24", "--swap-interval", "0"]);
        let config = cli.window_config();
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.depth_bits, 24);
        assert_eq!(config.swap_interval, 0);
    }

    #[test]
    fn zero_size_is_rejected() {
        let args = ["tricolor", "--height", "0"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn triangle_scene_draws_one_batch() {
        let cli = parse(&["--scene", "triangle"]);
        let mut ctx = RecordingContext::new();
        cli.scene().render(&mut ctx);
        assert_eq!(ctx.count(|c| *c == Command::End), 1);
    }

    #[test]
    fn vertex_colors_flag_switches_mesh_coloring() {
        let cli = parse(&["--vertex-colors"]);
        assert_eq!(cli.coloring(), Coloring::PerVertex);

        let mut ctx = RecordingContext::new();
        cli.scene().render(&mut ctx);
        assert!(ctx.commands().contains(&Command::Color(0.0, 0.0, 1.0)));
    }
}
