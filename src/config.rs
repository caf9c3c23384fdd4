//! Configuration and CLI argument handling

use std::time::Duration;

use anyhow::bail;
use clap::Parser;

use crate::{state::ClockSettings, utils::geometry::Size};

/// Highest frame rate the pump will accept
pub const MAX_FPS: u32 = 1000;

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "prism-clock")]
#[command(about = "A wandering, color-cycling analog clock simulation")]
#[command(version)]
pub struct Config {
    /// Canvas width in pixels
    #[arg(long, default_value = "1920")]
    pub width: f64,

    /// Canvas height in pixels
    #[arg(long, default_value = "1080")]
    pub height: f64,

    /// Frame ticks per second
    #[arg(long, default_value = "60")]
    pub fps: u32,

    /// Seed for reproducible motion and colors
    #[arg(long)]
    pub seed: Option<u64>,

    /// Delay before the first frame, in milliseconds (values past the orphan timeout trigger cleanup)
    #[arg(long, default_value = "0")]
    pub start_delay_ms: u64,

    /// Stop after this many seconds instead of waiting for a signal
    #[arg(long)]
    pub run_secs: Option<u64>,

    /// Seconds between random direction changes
    #[arg(long, default_value = "15")]
    pub direction_interval: u64,

    /// Seconds between color transitions
    #[arg(long, default_value = "30")]
    pub color_interval: u64,

    /// Nominal motion speed in pixels per tick
    #[arg(long, default_value = "0.16")]
    pub base_speed: f64,

    /// Print frames as JSON lines instead of logging them
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.fps == 0 || self.fps > MAX_FPS {
            bail!("--fps must be between 1 and {}, got {}", MAX_FPS, self.fps);
        }
        if !self.width.is_finite() || !self.height.is_finite() || self.width < 0.0 || self.height < 0.0 {
            bail!("canvas size must be finite and non-negative, got {}x{}", self.width, self.height);
        }
        if !(self.base_speed.is_finite() && self.base_speed > 0.0) {
            bail!("--base-speed must be a positive number, got {}", self.base_speed);
        }
        if self.direction_interval == 0 || self.color_interval == 0 {
            bail!("--direction-interval and --color-interval must be at least one second");
        }
        Ok(())
    }

    pub fn canvas_size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }

    /// Engine settings with the CLI overrides applied
    pub fn clock_settings(&self) -> ClockSettings {
        let mut settings = ClockSettings::default();
        settings.motion.base_speed = self.base_speed;
        settings.direction_change_interval = Duration::from_secs(self.direction_interval);
        settings.color_change_interval = Duration::from_secs(self.color_interval);
        settings
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
