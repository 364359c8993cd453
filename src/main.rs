mod app;
mod clock;
mod domain;
mod export;
mod input;
mod notifications;
mod persistence;
mod reminders;
mod rounding;
mod settings;
mod ticker;
mod timefmt;
mod timer;
mod ui;

use anyhow::Result;
use app::AppState;
use clap::{Parser, Subcommand};
use clock::SystemClock;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use notifications::DesktopNotifier;
use persistence::{JsonStore, TaskStore};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "rupt")]
#[command(about = "A keyboard-first task timer for the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .rupt directory in the current directory
    Init,
    /// Export the activity log as plain text (or JSON with --json)
    Export {
        /// Restrict the log to one day (YYYY-MM-DD format)
        #[arg(short, long)]
        date: Option<String>,
        /// Output file path. Defaults to a file in the data directory.
        #[arg(short, long)]
        output: Option<String>,
        /// Export the raw task snapshot as JSON instead of a text log
        #[arg(long)]
        json: bool,
    },
    /// Import a JSON task export, replacing the local collection
    Import {
        /// Path to a JSON file containing an array of tasks
        file: String,
    },
}

fn main() -> Result<()> {
    // Tracing is opt-in via RUST_LOG so the TUI stays clean by default.
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| EnvFilter::try_new(raw.trim()).ok())
        .unwrap_or_else(|| EnvFilter::new("off"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let data_dir = persistence::init_local_dir()?;
            println!("Initialized rupt directory: {}", data_dir.display());
            println!();
            println!("Rupt will now use this local directory for task storage.");
            println!("Run 'rupt' to start tracking tasks.");
            Ok(())
        }
        Some(Commands::Export { date, output, json }) => run_export(date, output, json),
        Some(Commands::Import { file }) => run_import(&file),
        None => run_tui(),
    }
}

fn run_export(date: Option<String>, output: Option<String>, json: bool) -> Result<()> {
    let date = date
        .map(|d| {
            chrono::NaiveDate::parse_from_str(&d, "%Y-%m-%d")
                .map_err(|e| anyhow::anyhow!("Invalid date format. Use YYYY-MM-DD: {}", e))
        })
        .transpose()?;
    let output = output.map(PathBuf::from);

    let store = JsonStore::new(persistence::tasks_file()?);
    let tasks = store.load_initial()?;

    let now = chrono::Local::now();
    let path = if json {
        export::write_json_export(&tasks, output, now.date_naive())?
    } else {
        export::write_log(&tasks, date, output, now)?
    };
    println!("Exported: {}", path.display());
    Ok(())
}

fn run_import(file: &str) -> Result<()> {
    let mut tasks = export::read_tasks_json(file)?;
    // No timing session exists outside the TUI; imported tasks land
    // paused and resume from their stored durations.
    domain::coerce_running_to_paused(&mut tasks);

    let store = JsonStore::new(persistence::tasks_file()?);
    store.persist(&tasks)?;
    println!("Imported {} tasks.", tasks.len());
    Ok(())
}

fn run_tui() -> Result<()> {
    let data_dir = persistence::ensure_data_dir()?;
    eprintln!("Using rupt directory: {}", data_dir.display());

    let settings_path = persistence::settings_file()?;
    let settings = match settings::load_settings(&settings_path) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!("failed to load settings, using defaults: {err}");
            settings::Settings::default()
        }
    };
    // First run: write the defaults so there is a file to edit
    if !settings_path.exists() {
        if let Err(err) = settings::save_settings(&settings_path, &settings) {
            tracing::warn!("failed to write default settings: {err}");
        }
    }

    let store = Rc::new(JsonStore::new(persistence::tasks_file()?));
    let tasks = match store.load_initial() {
        Ok(tasks) => tasks,
        Err(err) => {
            tracing::warn!("failed to load tasks, starting empty: {err}");
            Vec::new()
        }
    };

    let mut app = AppState::new(
        tasks,
        settings,
        Rc::new(SystemClock),
        store,
        Rc::new(DesktopNotifier),
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Freeze the running task and write a final snapshot
    app.shutdown();

    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    let poll_timeout = ticker::poll_timeout();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with a timeout so timers keep advancing
        if event::poll(poll_timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    let should_quit = input::handle_key(app, key)?;
                    if should_quit {
                        return Ok(());
                    }
                }
            }
        }

        // Elapsed write-back and both reminder checks
        app.tick();

        // Autosave if a tick changed anything
        app.flush();
    }
}
