//! Habit Score - Main Entry Point
//!
//! Command-line front end for the habit tracker. The actual implementation
//! is in the `habit_score` library.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use habit_score::HabitHandler;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Habit Score - track daily habits, see your score and rank
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the habit data file (TOML)
    file: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all tasks in order
    Tasks,
    /// Add a task
    AddTask {
        title: String,
        /// Point value for a bonus task (1-10)
        #[arg(long, default_value_t = 1)]
        points: i64,
        /// Make this a core task sharing the 100-point pool
        #[arg(long)]
        core: bool,
    },
    /// Edit a task's title, points or core flag
    EditTask {
        /// Task id, id prefix, position or title
        task: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        points: Option<i64>,
        #[arg(long)]
        core: Option<bool>,
    },
    /// Activate a task
    Activate { task: String },
    /// Deactivate a task
    Deactivate { task: String },
    /// Remove a task
    RemoveTask { task: String },
    /// Move a task to a 1-based position
    MoveTask { task: String, position: usize },
    /// Toggle a task's check for a day
    Check {
        task: String,
        /// Date in YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Set the note for a day (an empty note clears it)
    Note {
        text: String,
        #[arg(long)]
        date: Option<String>,
    },
    /// Exclude a day from history stats
    Exclude {
        #[arg(long)]
        date: Option<String>,
        /// Include the day again
        #[arg(long)]
        undo: bool,
    },
    /// Show a day with its score
    Day {
        date: Option<String>,
        /// Print the score as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete everything recorded for a day
    Clear {
        #[arg(long)]
        date: Option<String>,
    },
    /// List months with logged days, most recent first
    Months,
    /// Summarize scores over a month or the full history
    History {
        /// Month in YYYY-MM
        #[arg(long)]
        month: Option<String>,
        /// Count days marked as excluded
        #[arg(long)]
        include_excluded: bool,
    },
}

fn init_tracing() {
    // Tracing is opt-in via RUST_LOG
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| EnvFilter::try_new(raw.trim()).ok())
        .unwrap_or_else(|| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(args: Args) -> Result<String> {
    let mut handler = HabitHandler::open(&args.file)?;
    match args.command {
        Command::Tasks => Ok(handler.handle_tasks()),
        Command::AddTask {
            title,
            points,
            core,
        } => handler.handle_add_task(&title, points, core),
        Command::EditTask {
            task,
            title,
            points,
            core,
        } => handler.handle_edit_task(&task, title.as_deref(), points, core),
        Command::Activate { task } => handler.handle_set_active(&task, true),
        Command::Deactivate { task } => handler.handle_set_active(&task, false),
        Command::RemoveTask { task } => handler.handle_remove_task(&task),
        Command::MoveTask { task, position } => handler.handle_move_task(&task, position),
        Command::Check { task, date } => handler.handle_check(date.as_deref(), &task),
        Command::Note { text, date } => handler.handle_note(date.as_deref(), &text),
        Command::Exclude { date, undo } => handler.handle_exclude(date.as_deref(), !undo),
        Command::Day { date, json } => handler.handle_day(date.as_deref(), json),
        Command::Clear { date } => handler.handle_clear_day(date.as_deref()),
        Command::Months => Ok(handler.handle_months()),
        Command::History {
            month,
            include_excluded,
        } => handler.handle_history(month.as_deref(), include_excluded),
    }
}

fn main() {
    // Check if no arguments were provided (except the program name)
    if std::env::args().len() == 1 {
        let mut cmd = Args::command();
        cmd.print_help().ok();
        println!();
        std::process::exit(2);
    }

    init_tracing();
    let args = Args::parse();
    match run(args) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
