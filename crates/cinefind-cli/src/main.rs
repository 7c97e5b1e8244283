mod text;

use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use cinefind_core::config::{AppConfig, ThemePreference};
use cinefind_core::view::{HtmlRenderer, Renderer};
use cinefind_runtime::{load_config, native_controller, Controller};

use text::TextRenderer;

/// Search the OMDb movie catalog from the terminal
#[derive(Parser)]
#[command(name = "cinefind", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to the per-user config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the built-in popular movies
    Popular {
        /// Export the page as HTML
        #[arg(long)]
        html: Option<PathBuf>,
    },
    /// Search by title
    Search {
        #[arg(required = true)]
        query: Vec<String>,
        /// Export the page as HTML
        #[arg(long)]
        html: Option<PathBuf>,
    },
    /// Show full details for an IMDb id
    Detail {
        id: String,
        /// Export the page as HTML
        #[arg(long)]
        html: Option<PathBuf>,
    },
    /// List recent searches and the search counter
    History,
    /// Forget recent searches (the counter is kept)
    ClearHistory,
    /// Print the current theme
    Theme {
        /// Switch between light and dark and remember the choice
        #[arg(long)]
        toggle: bool,
    },
}

impl Commands {
    fn html_target(&self) -> Option<&Path> {
        match self {
            Self::Popular { html } | Self::Search { html, .. } | Self::Detail { html, .. } => {
                html.as_deref()
            }
            _ => None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    let mut config = load_config(cli.config.as_deref())?;
    config.ui.default_theme = resolve_theme(config.ui.default_theme);
    let storage_path = AppConfig::storage_path();

    if let Some(path) = cli.command.html_target() {
        let mut ctrl = native_controller(&config, &storage_path, HtmlRenderer::new())?;
        ctrl.start();
        run(&mut ctrl, &cli.command).await;
        std::fs::write(path, ctrl.renderer().document())?;
        info!(path = %path.display(), "Exported page");
        return Ok(());
    }

    let mut ctrl = native_controller(&config, &storage_path, TextRenderer::new(io::stdout()))?;
    // Only `popular` wants the start-up grid on screen.
    let show_start = matches!(cli.command, Commands::Popular { .. });
    ctrl.renderer_mut().set_muted(!show_start);
    ctrl.start();
    ctrl.renderer_mut().set_muted(false);

    run(&mut ctrl, &cli.command).await;

    match &cli.command {
        Commands::History => ctrl.renderer_mut().print_history(),
        Commands::Theme { .. } => {
            let theme = ctrl.renderer().theme();
            println!("{theme}");
        }
        _ => {}
    }
    Ok(())
}

/// Drive the controller for one command. `start` has already run.
async fn run<C, R>(ctrl: &mut Controller<C, R>, command: &Commands)
where
    C: cinefind_api::CatalogService,
    R: Renderer,
{
    match command {
        Commands::Popular { .. } | Commands::History => {}
        Commands::Search { query, .. } => ctrl.submit(&query.join(" ")).await,
        Commands::Detail { id, .. } => ctrl.select_detail(id).await,
        Commands::ClearHistory => ctrl.clear_history(),
        Commands::Theme { toggle } => {
            if *toggle {
                ctrl.toggle_theme();
            }
        }
    }
}

/// `system` follows the OS appearance; anything but a confirmed light mode is dark.
fn resolve_theme(pref: ThemePreference) -> ThemePreference {
    match pref {
        ThemePreference::System => match dark_light::detect() {
            Ok(dark_light::Mode::Light) => ThemePreference::Light,
            _ => ThemePreference::Dark,
        },
        fixed => fixed,
    }
}

fn init_logging(
    verbose: bool,
    log_file: Option<&Path>,
) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error>> {
    let default = if verbose { "cinefind=debug" } else { "cinefind=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    match log_file {
        Some(path) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
            let name = path.file_name().ok_or("log file path has no file name")?;
            let appender = tracing_appender::rolling::never(dir.unwrap_or(Path::new(".")), name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
            Ok(None)
        }
    }
}
