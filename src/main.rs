//! starterm CLI
//!
//! Paged terminal menus: file chooser, service dashboard, launcher, demo.

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use crossterm::tty::IsTty;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

use starterm::chooser::{Chooser, Mode};
use starterm::config;
use starterm::dashboard;
use starterm::demo;
use starterm::launcher;
use starterm::menu::{self, MenuItem};
use starterm::page::Feedback;
use starterm::report::format_report;
use starterm::strings::Text;
use starterm::types::{Chosen, Config, OutputFormat, ServiceStatus};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "STARTERM_LOG";

#[derive(Parser)]
#[command(name = "starterm")]
#[command(about = "Paged terminal menus: file chooser, service dashboard, launcher")]
#[command(version)]
struct Cli {
    /// Config file (default: <config dir>/starterm/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse directories and print the chosen path
    Choose {
        /// Directory to start in (default: current directory)
        path: Option<PathBuf>,

        /// What is listed and what may be picked
        #[arg(long, value_enum, default_value = "all")]
        mode: ModeArg,
    },

    /// Probe the configured services and show their status
    Dashboard {
        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },

    /// Menu of configured URIs to open
    Launch,

    /// Sample page with every row kind
    Demo,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ModeArg {
    All,
    Dirs,
    Files,
    DirsAll,
    FilesAll,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::All => Mode::All,
            ModeArg::Dirs => Mode::DirectoriesOnly,
            ModeArg::Files => Mode::FilesOnly,
            ModeArg::DirsAll => Mode::DirectoriesAll,
            ModeArg::FilesAll => Mode::FilesAll,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Some(Commands::Choose { path, mode }) => cmd_choose(&config, path, mode.into()),
        Some(Commands::Dashboard { format }) => cmd_dashboard(&config, format.into()),
        Some(Commands::Launch) => cmd_launch(&config),
        Some(Commands::Demo) => cmd_demo(&config),
        None => cmd_menu(&config),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// SETUP
// ============================================================================

/// Logs go to stderr so they never mix with the page on stdout.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .init();
}

/// Load config; plain output when stdout is not a terminal.
fn load_config(path: Option<&Path>) -> Result<Config, String> {
    let mut config = config::load(path).map_err(|e| e.to_string())?;
    if !io::stdout().is_tty() {
        config.display.decorate = false;
        config.display.clear_screen = false;
    }
    Ok(config)
}

// ============================================================================
// PROGRESS HELPERS
// ============================================================================

fn progress_bar(total: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓░");
    pb.set_style(style);
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_choose(config: &Config, path: Option<PathBuf>, mode: Mode) -> Result<(), String> {
    let start = path.unwrap_or_else(|| PathBuf::from("."));
    let chosen = choose(config, &start, mode)?;
    if let Some(chosen) = chosen {
        println!("{}", chosen.path.display());
    }
    Ok(())
}

fn choose(config: &Config, start: &Path, mode: Mode) -> Result<Option<Chosen>, String> {
    let mut chooser = Chooser::new(start, mode, config).map_err(|e| e.to_string())?;
    chooser.choose().map_err(|e| e.to_string())
}

fn cmd_dashboard(config: &Config, format: OutputFormat) -> Result<(), String> {
    let interactive = format == OutputFormat::Human && io::stdout().is_tty();

    let statuses = if interactive {
        probe_with_progress(config)
    } else {
        dashboard::probe_all(config)
    };

    if interactive {
        show_dashboard(config, &statuses)
    } else {
        let text = format_report(&statuses, format).map_err(|e| e.to_string())?;
        print!("{}", text);
        Ok(())
    }
}

fn probe_with_progress(config: &Config) -> Vec<ServiceStatus> {
    let pb = progress_bar(
        config.dashboard.len() as u64,
        Text::DashboardChecking.as_str(),
    );

    let statuses: Vec<_> = config
        .dashboard
        .par_iter()
        .progress_with(pb.clone())
        .map(|service| dashboard::probe(service, config))
        .collect();

    pb.finish_and_clear();
    statuses
}

fn show_dashboard(config: &Config, statuses: &[ServiceStatus]) -> Result<(), String> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();
    dashboard::show(statuses, config, &mut input, &mut output).map_err(|e| e.to_string())
}

fn cmd_launch(config: &Config) -> Result<(), String> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();
    launcher::run_with(config, &mut input, &mut output, launcher::open_uri)
        .map_err(|e| e.to_string())
}

fn cmd_demo(config: &Config) -> Result<(), String> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();
    demo::run_with(config, &mut rand::thread_rng(), &mut input, &mut output)
        .map_err(|e| e.to_string())
}

/// Main menu: each pick runs a tool, then comes back here.
fn cmd_menu(config: &Config) -> Result<(), String> {
    let mut page = menu::build_page(config).map_err(|e| e.to_string())?;

    loop {
        let Some(item) = menu::picked(&page.run()) else {
            return Ok(());
        };

        let outcome = match item {
            MenuItem::Dashboard => cmd_dashboard(config, OutputFormat::Human),
            MenuItem::Launcher => cmd_launch(config),
            MenuItem::Demo => cmd_demo(config),
            MenuItem::Chooser => {
                let start = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
                choose(config, &start, Mode::All).map(|chosen| {
                    if let Some(chosen) = chosen {
                        page.report(Feedback::info(
                            Text::Picked.as_str(),
                            chosen.path.display().to_string(),
                        ));
                    }
                })
            }
        };

        if let Err(e) = outcome {
            page.report_error(item.text().as_str(), e);
        }
    }
}
