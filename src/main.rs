//! pankview - browse an AI answer and its follow-ups in the terminal.
//!
//! # Usage
//!
//! ```bash
//! pankview
//! pankview --payload answer.json
//! pankview --no-sidebar --latency-ms 1500
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pankview::app::App;
use pankview::config::{
    ConfigFlags, ThemeMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use pankview::conversation::payload::{load_content, sample_content};
use pankview::perf;
use pankview::ui::style::{Background, set_background};

/// Browse an AI answer in the terminal, with a sidebar that follows scrolling
#[derive(Parser, Debug)]
#[command(name = "pankview", version, about, long_about = None)]
struct Cli {
    /// JSON turn content used for the first answer and simulated follow-ups
    #[arg(long, value_name = "FILE")]
    payload: Option<PathBuf>,

    /// Hide the contents sidebar
    #[arg(long)]
    no_sidebar: bool,

    /// Start with the contents sidebar visible
    #[arg(long)]
    sidebar: bool,

    /// Simulated answer latency in milliseconds
    #[arg(long, value_name = "MS")]
    latency_ms: Option<u64>,

    /// Delay between a new answer appearing and scrolling to it
    #[arg(long, value_name = "MS")]
    mount_delay_ms: Option<u64>,

    /// Force the color scheme for a light or dark terminal background
    #[arg(long, value_enum, default_value = "auto")]
    theme: ThemeMode,

    /// Enable startup performance logging
    #[arg(long)]
    perf: bool,

    /// Write detailed render/event debug events to a file
    #[arg(long, value_name = "PATH")]
    render_debug_log: Option<PathBuf>,

    /// Write tracing output to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults in the global config
    #[arg(long)]
    save: bool,

    /// Clear saved defaults in the global config
    #[arg(long)]
    clear: bool,
}

/// `RUST_LOG` directives when set and valid, otherwise WARN.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = log_filter(directives.as_deref());
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        builder.with_writer(Mutex::new(file)).with_ansi(false).init();
    } else {
        builder.with_writer(std::io::stderr).init();
    }
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_tracing(effective.log_file.as_deref())?;

    perf::set_enabled(effective.perf);
    let render_debug_log_path = effective
        .render_debug_log
        .clone()
        .or_else(|| std::env::var_os("PANKVIEW_RENDER_DEBUG_LOG").map(PathBuf::from));
    if let Err(err) = perf::set_debug_log_path(render_debug_log_path.as_deref()) {
        tracing::warn!(
            path = ?render_debug_log_path,
            %err,
            "failed to initialize render debug log"
        );
    }

    match effective.theme.unwrap_or(ThemeMode::Auto) {
        ThemeMode::Auto => set_background(None),
        ThemeMode::Light => set_background(Some(Background::Light)),
        ThemeMode::Dark => set_background(Some(Background::Dark)),
    }

    let content = match &effective.payload {
        Some(path) => load_content(path)
            .with_context(|| format!("Failed to load payload {}", path.display()))?,
        None => sample_content(),
    };

    let mut app = App::new(content).with_sidebar_visible(effective.sidebar_visible());
    if let Some(ms) = effective.latency_ms {
        app = app.with_answer_delay(ms);
    }
    if let Some(ms) = effective.mount_delay_ms {
        app = app.with_mount_delay(ms);
    }
    let mut app = app.with_config_paths(
        Some(global_path.clone()),
        if local_path.exists() {
            Some(local_path.clone())
        } else {
            None
        },
    );

    app.run().context("Application error")
}
