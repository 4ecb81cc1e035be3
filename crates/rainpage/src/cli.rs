use std::path::PathBuf;

use clap::Parser;
use rainpage_config::{Config, ConfigError};

/// A memoir page for the terminal with a falling-glyph background.
#[derive(Debug, Default, Parser)]
#[command(name = "rainpage", version, about)]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Page file to show instead of the built-in page.
    #[arg(long, value_name = "PATH")]
    pub page: Option<PathBuf>,

    /// Disable the background animation.
    #[arg(long)]
    pub no_rain: bool,

    /// Background frames per second.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: Option<u32>,
}

impl Cli {
    /// Load the config file and apply command-line overrides.
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        self.apply(&mut config);
        Ok(config)
    }

    fn apply(&self, config: &mut Config) {
        if let Some(page) = &self.page {
            config.page.path = Some(page.clone());
        }
        if self.no_rain {
            config.rain.enabled = false;
        }
        if let Some(fps) = self.fps {
            config.rain.frame_rate = fps;
        }
    }
}
