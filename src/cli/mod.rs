pub mod account;
pub mod calendar;
pub mod habits;
pub mod progress;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;

use crate::{
    account::AccountService,
    core::tracker::HabitTracker,
    storage::{
        completion_store::KvCompletionStore, habit_repository::KvHabitRepository,
        kv_store::KvStore,
    },
    utils::{
        clock::{Clock, DefaultClock},
        dir::create_application_default_path,
        logging::{enable_logging, CLI_PREFIX},
    },
};

use habits::Frequency;

#[derive(Parser, Debug)]
#[command(name = "Habitkeep", version, long_about = None)]
#[command(about = "Local-first habit tracker with streaks and progress", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, help = "Enable logging")]
    log: bool,
    #[arg(
        long,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Create an account and log in")]
    Register {
        name: String,
        email: String,
        password: String,
    },
    #[command(about = "Log in with an existing account")]
    Login { email: String, password: String },
    #[command(about = "Log out of the current session")]
    Logout,
    #[command(about = "Show the logged-in user")]
    Whoami,
    #[command(about = "Create a habit")]
    Add {
        name: String,
        #[arg(long, default_value_t = Frequency::Daily, help = "How often the habit repeats")]
        frequency: Frequency,
    },
    #[command(about = "Delete a habit and its completion history")]
    Remove {
        #[arg(help = "Habit name or id")]
        habit: String,
    },
    #[command(about = "Mark a habit complete for today")]
    Done {
        #[arg(help = "Habit name or id")]
        habit: String,
    },
    #[command(about = "Remove today's completion for a habit")]
    Undo {
        #[arg(help = "Habit name or id")]
        habit: String,
    },
    #[command(about = "List habits with streaks and today's state")]
    List,
    #[command(about = "Show today's and this week's completion percentages")]
    Progress,
    #[command(about = "Show a month calendar of completions for a habit")]
    Calendar {
        #[arg(help = "Habit name or id")]
        habit: String,
        #[arg(long, help = "Month to display, YYYY-MM. Defaults to the current month")]
        month: Option<String>,
    },
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let data_dir = match &args.dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            dir.clone()
        }
        None => create_application_default_path()?,
    };

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(CLI_PREFIX, &data_dir, logging_level, args.log)?;

    let store = KvStore::new(data_dir.join("store"))?;
    let accounts = AccountService::new(store.clone(), Box::new(DefaultClock));
    let tracker = HabitTracker::new(
        KvHabitRepository::new(store.clone()),
        KvCompletionStore::new(store),
        Box::new(DefaultClock),
    );

    match args.commands {
        Commands::Register {
            name,
            email,
            password,
        } => account::register(&accounts, &name, &email, &password).await,
        Commands::Login { email, password } => account::login(&accounts, &email, &password).await,
        Commands::Logout => account::logout(&accounts).await,
        Commands::Whoami => account::whoami(&accounts).await,
        Commands::Add { name, frequency } => {
            let user = account::require_user(&accounts).await?;
            habits::add(&tracker, &user, &name, frequency).await
        }
        Commands::Remove { habit } => {
            let user = account::require_user(&accounts).await?;
            habits::remove(&tracker, &user, &habit).await
        }
        Commands::Done { habit } => {
            let user = account::require_user(&accounts).await?;
            habits::done(&tracker, &user, &habit).await
        }
        Commands::Undo { habit } => {
            let user = account::require_user(&accounts).await?;
            habits::undo(&tracker, &user, &habit).await
        }
        Commands::List => {
            let user = account::require_user(&accounts).await?;
            habits::list(&tracker, &user).await
        }
        Commands::Progress => {
            let user = account::require_user(&accounts).await?;
            progress::show(&tracker, &user).await
        }
        Commands::Calendar { habit, month } => {
            let user = account::require_user(&accounts).await?;
            calendar::show(&tracker, &user, &habit, month, DefaultClock.today()).await
        }
    }
}
