use anyhow::Context;
use clap::Parser;
use log::{debug, error, info, warn};
use std::path::PathBuf;
use std::time::Duration;
use worley::display::{Display, InputEvent, RenderTarget};
use worley::{render, AppConfig, Preset, RenderMode};

/// Idle time per loop iteration when presents are not paced by vsync
const IDLE_FRAME: Duration = Duration::from_millis(16);

/// Click the window to scatter new seeds and redraw.
#[derive(Parser, Debug)]
#[command(name = "worley", version, about)]
struct Args {
    /// Starting point for every other setting
    #[arg(long, value_enum, default_value_t = Preset::Noise)]
    preset: Preset,

    /// JSON config file, used in place of the preset
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Window width in pixels
    #[arg(long, short = 'W')]
    width: Option<u32>,

    /// Window height in pixels
    #[arg(long, short = 'H')]
    height: Option<u32>,

    /// Grid is SECTIONS x SECTIONS cells
    #[arg(long, short = 's')]
    sections: Option<u32>,

    /// Seed points per cell
    #[arg(long, short = 'a')]
    amount: Option<u32>,

    /// Fixed RNG seed, making every render identical
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_enum)]
    mode: Option<RenderMode>,

    /// Radius of seed markers in the diagnostic overlay
    #[arg(long)]
    point_radius: Option<u32>,

    /// Disable VSync
    #[arg(long)]
    no_vsync: bool,
}

impl Args {
    /// Config file (or preset when absent), then flags
    fn resolve(&self) -> anyhow::Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) if path.exists() => AppConfig::load(path)?,
            Some(path) => {
                warn!(
                    "Config file {} not found, using the {:?} preset",
                    path.display(),
                    self.preset
                );
                self.preset.config()
            },
            None => self.preset.config(),
        };

        if let Some(width) = self.width {
            config.field.width = width;
        }
        if let Some(height) = self.height {
            config.field.height = height;
        }
        if let Some(sections) = self.sections {
            config.field.sections = sections;
        }
        if let Some(amount) = self.amount {
            config.field.amount_per_cell = amount;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(radius) = self.point_radius {
            config.point_radius = radius;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.no_vsync {
            config.vsync = false;
        }

        config.validate()?;
        Ok(config)
    }
}

fn render_frame(target: &mut RenderTarget, config: &AppConfig) {
    info!("Rendering started...");
    match target.with_canvas(|canvas| render(canvas, config)) {
        Ok(stats) => info!(
            "Rendering complete: {} with {} seeds in {} ms (seed {})",
            stats.mode.name(),
            stats.seeds,
            stats.elapsed.as_millis(),
            stats.rng_seed
        ),
        Err(e) => error!("Rendering failed: {}", e),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = args.resolve()?;
    debug!("Resolved configuration: {:?}", config);

    let (mut display, texture_creator) = Display::with_options(
        "Worley Noise",
        config.field.width,
        config.field.height,
        config.vsync,
    )
    .map_err(anyhow::Error::msg)
    .context("creating window")?;
    let mut target =
        RenderTarget::with_size(&texture_creator, display.width(), display.height())
            .map_err(anyhow::Error::msg)
            .context("creating render surface")?;
    target.clear()?;

    info!(
        "{}x{} window, {}x{} grid, {} seed(s) per cell",
        display.width(),
        display.height(),
        config.field.sections,
        config.field.sections,
        config.field.amount_per_cell
    );
    info!("Left click renders, M toggles the mode, Escape quits");

    'main: loop {
        for event in display.poll_events() {
            match event {
                InputEvent::Quit => break 'main,
                InputEvent::RenderRequested => render_frame(&mut target, &config),
                InputEvent::ToggleMode => {
                    config.mode = config.mode.toggled();
                    info!("Switched to {}", config.mode.name());
                    render_frame(&mut target, &config);
                },
            }
        }

        display.present(&target).map_err(anyhow::Error::msg)?;
        if !config.vsync {
            std::thread::sleep(IDLE_FRAME);
        }
    }

    info!("Bye");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_preset() {
        let args = Args::parse_from([
            "worley",
            "--preset",
            "diagnostic",
            "--sections",
            "20",
            "--seed",
            "9",
            "--mode",
            "noise-field",
        ]);
        let config = args.resolve().unwrap();
        assert_eq!(config.field.width, 1000);
        assert_eq!(config.field.sections, 20);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.mode, RenderMode::NoiseField);
    }

    #[test]
    fn test_invalid_flags_rejected() {
        let args = Args::parse_from(["worley", "--width", "10", "--sections", "25"]);
        assert!(args.resolve().is_err());
    }

    #[test]
    fn test_config_file_replaces_preset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("worley.json");
        std::fs::write(&path, r#"{ "point_radius": 8 }"#).unwrap();

        let args = Args::parse_from([
            "worley",
            "--preset",
            "diagnostic",
            "--config",
            path.to_str().unwrap(),
        ]);
        let config = args.resolve().unwrap();
        assert_eq!(config.point_radius, 8);
        assert_eq!(config.field, AppConfig::default().field);
    }

    #[test]
    fn test_missing_config_file_falls_back_to_preset() {
        let args = Args::parse_from(["worley", "--config", "/nonexistent/worley.json"]);
        assert_eq!(args.resolve().unwrap(), Preset::Noise.config());
    }
}
