mod listing;
mod tui;

use std::io;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use geodo_core::{
    parse_task_input, ApiClient, ApiError, AuthApi, Config, DoneFilter, FileSessionStore, LocationService,
    PlaceDraft, PriorityFilter, SessionContext, TaskFilter, TaskInput, TaskRepository, TaskService,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "geodo")]
#[command(about = "To-do list client with per-task locations", long_about = None)]
struct Cli {
    /// Backend base URL, overrides config.toml and GEODO_API_URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in and remember the session
    Login {
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and log in
    Register {
        email: String,
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Exchange the stored token for a fresh one
    Refresh,
    /// Show the logged in user
    Whoami,
    /// List tasks
    List {
        /// all, low, medium or high
        #[arg(long, default_value = "all")]
        priority: PriorityFilter,
        /// pending, done or any
        #[arg(long, default_value = "pending")]
        done: DoneFilter,
    },
    /// Add a task (usage: add "Task title" pri:high desc:details)
    Add {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        args: Vec<String>,
    },
    /// Edit a task; only the given fields change (usage: edit 3 pri:low done:yes)
    Edit {
        id: i64,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        args: Vec<String>,
    },
    /// Flip a task between done and pending
    Toggle { id: i64 },
    /// Deactivate a task
    Rm { id: i64 },
    /// Show or change the place attached to a task
    Location {
        #[command(subcommand)]
        action: LocationCommand,
    },
    /// Open the Terminal User Interface
    Tui,
}

#[derive(clap::Subcommand)]
enum LocationCommand {
    Show { task_id: i64 },
    Set {
        task_id: i64,
        #[command(flatten)]
        place: PlaceArgs,
    },
    Clear { task_id: i64 },
    /// Your own live location
    Me {
        #[command(subcommand)]
        action: MeCommand,
    },
}

#[derive(clap::Subcommand)]
enum MeCommand {
    Show,
    Set {
        #[command(flatten)]
        place: PlaceArgs,
    },
    Clear,
}

#[derive(clap::Args)]
struct PlaceArgs {
    #[arg(long, allow_negative_numbers = true)]
    lat: f64,
    #[arg(long, allow_negative_numbers = true)]
    lon: f64,
    #[arg(long)]
    name: String,
    /// Defaults to the name
    #[arg(long)]
    display_name: Option<String>,
    #[arg(long, default_value_t = 0)]
    place_id: i64,
}

impl PlaceArgs {
    fn into_draft(self) -> PlaceDraft {
        PlaceDraft {
            place_id: self.place_id,
            display_name: self.display_name.unwrap_or_else(|| self.name.clone()),
            name: self.name,
            lat: self.lat,
            lon: self.lon,
        }
    }
}

fn init_tracing(config: &Config, to_file: bool) -> Option<WorkerGuard> {
    let default_directives = if to_file { "info,geodo_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("GEODO_LOG")
        .or_else(|_| EnvFilter::try_new(default_directives))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    if to_file {
        // stderr would scribble over the alternate screen
        let appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("geodo")
            .filename_suffix("log")
            .build(config.log_dir())
            .ok()?;
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(writer).with_ansi(false).with_target(true))
            .try_init();
        Some(guard)
    } else {
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .try_init();
        None
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?.with_api_url(cli.api_url.clone());

    let tui_mode = matches!(cli.command, None | Some(Commands::Tui));
    let _guard = init_tracing(&config, tui_mode);

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let store = FileSessionStore::new(config.session_path())?;
    let session = SessionContext::restore(store.load()?);
    let client = ApiClient::from_config(&config)?.with_token(session.token().map(str::to_string));

    match cli.command {
        None | Some(Commands::Tui) => tui::run(runtime.handle().clone(), client, session, store),
        Some(command) => runtime.block_on(run_command(command, client, session, &store)),
    }
}

async fn run_command(command: Commands, client: ApiClient, mut session: SessionContext, store: &FileSessionStore) -> Result<()> {
    let result = execute(command, &client, &mut session, store).await;
    match result {
        Err(e) if is_unauthorized(&e) => {
            session.expire();
            store.clear()?;
            bail!("Session expired, please login again");
        }
        other => other,
    }
}

fn is_unauthorized(e: &anyhow::Error) -> bool {
    e.downcast_ref::<ApiError>().is_some_and(ApiError::is_unauthorized)
}

async fn execute(command: Commands, client: &ApiClient, session: &mut SessionContext, store: &FileSessionStore) -> Result<()> {
    let tasks = TaskService::new(client.clone());
    let locations = LocationService::new(client.clone());

    match command {
        Commands::Login { username, password } => {
            let info = client.login(&username, &password).await?;
            let s = session.login(info);
            store.save(s)?;
            println!("Logged in as {} ({})", s.user.username, s.user.email);
        }
        Commands::Register { email, username, password } => {
            let info = client.register(&email, &username, &password).await?;
            let s = session.login(info);
            store.save(s)?;
            println!("Registered and logged in as {}", s.user.username);
        }
        Commands::Logout => {
            session.logout();
            store.clear()?;
            println!("Logged out.");
        }
        Commands::Refresh => {
            if session.session().is_none() {
                bail!("Not logged in.");
            }
            let token = client.refresh().await?;
            session.replace_token(token);
            if let Some(s) = session.session() {
                store.save(s)?;
            }
            println!("Session token refreshed.");
        }
        Commands::Whoami => match session.session() {
            Some(s) => println!(
                "{} <{}> (id {}, since {})",
                s.user.username,
                s.user.email,
                s.user.id,
                s.logged_in_at.format("%Y-%m-%d %H:%M")
            ),
            None => println!("Not logged in."),
        },
        Commands::List { priority, done } => {
            let listed = client.list(TaskFilter::new(priority, done)).await?;
            if listed.is_empty() {
                println!("No Tasks in this filter.");
            } else {
                println!("{}", listing::render_tasks(&listed));
            }
        }
        Commands::Add { args } => {
            let input = parse_task_input(&args, None)?;
            let title = input.title.clone();
            tasks.save(None, input, session).await?;
            println!("Task added: {}", title);
        }
        Commands::Edit { id, args } => {
            let existing = tasks.get(id).await.map_err(|e| not_found(e, id))?;
            let input = parse_task_input(&args, Some(TaskInput::from_task(&existing)))?;
            tasks.save(Some(&existing), input, session).await?;
            println!("Task {} updated.", id);
        }
        Commands::Toggle { id } => {
            tasks.toggle(id, session).await.map_err(|e| not_found(e, id))?;
            let task = tasks.get(id).await?;
            println!("Task {} is now {}.", id, if task.done { "done" } else { "pending" });
        }
        Commands::Rm { id } => {
            tasks.deactivate(id, session).await.map_err(|e| not_found(e, id))?;
            println!("Task {} deleted.", id);
        }
        Commands::Location { action } => match action {
            LocationCommand::Show { task_id } => match locations.location_for(task_id).await? {
                Some(loc) => println!("{}", listing::render_location(&loc)),
                None => println!("Task {} has no location.", task_id),
            },
            LocationCommand::Set { task_id, place } => {
                let place = place.into_draft();
                locations.set(task_id, &place, session).await?;
                println!("Location of task {} set to {}.", task_id, place.name);
            }
            LocationCommand::Clear { task_id } => {
                if locations.remove(task_id, session).await? {
                    println!("Location of task {} removed.", task_id);
                } else {
                    println!("Task {} has no location.", task_id);
                }
            }
            LocationCommand::Me { action } => match action {
                MeCommand::Show => match locations.user_location(session).await? {
                    Some(loc) => println!("{}", listing::render_user_location(&loc)),
                    None => println!("You have not set a location."),
                },
                MeCommand::Set { place } => {
                    let place = place.into_draft();
                    locations.set_user(&place, session).await?;
                    println!("Your location is now {}.", place.name);
                }
                MeCommand::Clear => {
                    if locations.remove_user(session).await? {
                        println!("Your location was removed.");
                    } else {
                        println!("You have not set a location.");
                    }
                }
            },
        },
        Commands::Tui => bail!("the terminal UI cannot run as a scripted command"),
    }
    Ok(())
}

fn not_found(e: ApiError, id: i64) -> anyhow::Error {
    match e {
        ApiError::NotFound => anyhow!("Task {} not found", id),
        other => other.into(),
    }
}
