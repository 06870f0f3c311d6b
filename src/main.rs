// tapetty: cancellable tape-machine interpreter with a terminal debugger

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{bail, Context};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tapetty::config::EngineConfig;
use tapetty::interpreter::constants::{DEFAULT_STEP_BUDGET, DEFAULT_YIELD_INTERVAL};
use tapetty::parser::ValidationPolicy;
use tapetty::presets;
use tapetty::runner::{RunController, RunState};
use tapetty::ui::App;

#[derive(Parser)]
#[command(name = "tapetty", version, about = "Run tape programs with live cancellation")]
struct Cli {
    /// Program file to load.
    file: Option<PathBuf>,

    /// Load a built-in program instead of a file (hello, alphabet, echo, snapshots, forever).
    #[arg(long, conflicts_with = "file")]
    preset: Option<String>,

    /// Characters consumed by `,` instructions.
    #[arg(long, default_value = "")]
    input: String,

    /// Instructions executed before a run is reported as overflowed.
    #[arg(long, default_value_t = DEFAULT_STEP_BUDGET)]
    step_budget: u64,

    /// Steps between two cancellation checks.
    #[arg(long, default_value_t = DEFAULT_YIELD_INTERVAL)]
    yield_interval: u64,

    /// Reject the `$` and `#` debug markers.
    #[arg(long)]
    strict: bool,

    /// Run once without the terminal UI and print the result.
    #[arg(long)]
    headless: bool,

    /// Append logs to this file (the UI owns the terminal, so logs are off by default there).
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    if let Some(path) = &cli.log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("cannot open log file '{}'", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if cli.headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .init();
    }
    Ok(())
}

/// Program text and the preset it came from, if any
fn load_source(cli: &Cli) -> anyhow::Result<(String, Option<usize>)> {
    if let Some(path) = &cli.file {
        let source = fs::read_to_string(path)
            .with_context(|| format!("cannot read '{}'", path.display()))?;
        return Ok((source, None));
    }

    let name = match (&cli.preset, cli.headless) {
        (Some(name), _) => name.as_str(),
        (None, true) => bail!("no program given: pass a FILE or --preset"),
        (None, false) => presets::PRESETS[0].name,
    };

    match presets::index_of(name) {
        Some(index) => Ok((presets::PRESETS[index].source.to_string(), Some(index))),
        None => bail!(
            "unknown preset '{}' (available: {})",
            name,
            presets::names().join(", ")
        ),
    }
}

fn run_headless(mut controller: RunController, source: &str, input: &str) -> anyhow::Result<ExitCode> {
    controller.start_run_with_input(source, input);
    controller.wait();
    let view = controller.view();

    let mut stdout = io::stdout().lock();
    stdout.write_all(view.result.output.as_bytes())?;
    stdout.flush()?;

    let mut stderr = io::stderr().lock();
    if !view.result.snapshots.is_empty() {
        writeln!(stderr, "{:>6} {:>6}  Character", "Index", "Value")?;
        for record in &view.result.snapshots {
            writeln!(
                stderr,
                "{:>6} {:>6}  {:?}",
                record.address, record.value, record.character
            )?;
        }
    }
    for line in view.result.error_lines() {
        writeln!(stderr, "{}", line)?;
    }
    writeln!(
        stderr,
        "{} after {} steps ({}ms)",
        view.state,
        view.result.stats.steps,
        view.result.stats.elapsed.as_millis()
    )?;

    Ok(if view.state == RunState::Done {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run_tui(controller: RunController, source: String, input: String, preset: Option<usize>) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(controller, source, input);
    if let Some(index) = preset {
        app.load_preset(index);
    }
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("terminal UI failed")
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let policy = if cli.strict {
        ValidationPolicy::Strict
    } else {
        ValidationPolicy::Permissive
    };
    let config = EngineConfig::default()
        .with_step_budget(cli.step_budget)
        .with_yield_interval(cli.yield_interval)
        .with_policy(policy);
    let controller = RunController::new(config)?;

    let (source, preset) = load_source(&cli)?;
    info!(chars = source.chars().count(), headless = cli.headless, "program loaded");

    if cli.headless {
        run_headless(controller, &source, &cli.input)
    } else {
        run_tui(controller, source, cli.input.clone(), preset)?;
        Ok(ExitCode::SUCCESS)
    }
}
