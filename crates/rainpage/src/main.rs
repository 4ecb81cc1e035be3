use clap::Parser;
use color_eyre::eyre::WrapErr;
use rainpage_config::Config;
use rainpage_effects::Document;
use ratatui::layout::Rect;

mod app;
mod cli;
mod logging;
mod page_view;

use app::App;
use cli::Cli;

/// Page shown when no page file is configured.
pub const BUILTIN_PAGE: &str = include_str!("../assets/page.toml");

const BANNER: &[&str] = &[
    "FAREWELL",
    "Thank you for six years of building in the open.",
    "Decentralization is not a destination, it is a journey.",
];

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let log_path = logging::init_logging();

    let config = cli.load_config().wrap_err("failed to load config")?;
    let document = load_page(&config)?;
    for line in BANNER {
        tracing::info!("{line}");
    }
    if let Some(path) = &log_path {
        tracing::debug!(path = %path.display(), "logging to file");
    }

    let mut terminal = ratatui::init();
    let result = terminal
        .size()
        .map_err(Into::into)
        .and_then(|size| {
            let area = Rect::new(0, 0, size.width, size.height);
            App::new(&config, document, area).run(terminal)
        });
    ratatui::restore();
    result
}

/// The configured page file, or the built-in page.
fn load_page(config: &Config) -> color_eyre::Result<Document> {
    match &config.page.path {
        Some(path) => Document::load(path)
            .wrap_err_with(|| format!("failed to load page {}", path.display())),
        None => Ok(Document::from_toml_str(BUILTIN_PAGE)?),
    }
}
