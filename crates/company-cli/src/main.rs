//! Company CLI
//!
//! Command-line and terminal interface for managing departments and
//! their employees.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use company_core::{Config, Store};

mod commands;
mod output;
mod tui;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "company")]
#[command(about = "Company - departments and employees management")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use a specific config file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI interface
    Tui,
    /// Manage departments
    #[command(alias = "dept")]
    Department {
        #[command(subcommand)]
        command: DepartmentCommands,
    },
    /// Manage employees
    #[command(alias = "emp")]
    Employee {
        #[command(subcommand)]
        command: EmployeeCommands,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Show status (database location, totals)
    Status,
}

#[derive(Subcommand)]
enum DepartmentCommands {
    /// Create a new department
    #[command(alias = "create")]
    Add {
        /// Department name
        name: String,
    },
    /// List all departments
    #[command(alias = "ls")]
    List,
    /// Find departments whose name contains a term
    Search {
        /// Search term (case-insensitive substring)
        term: String,
    },
    /// Count the employees of a department
    Count {
        /// Department ID
        id: i64,
    },
}

#[derive(Subcommand)]
enum EmployeeCommands {
    /// Create a new employee
    #[command(alias = "create")]
    Add {
        /// Employee name
        name: String,
        /// Department ID
        #[arg(short, long)]
        department: i64,
    },
    /// List the employees of a department
    #[command(alias = "ls")]
    List {
        /// Department ID
        #[arg(short, long)]
        department: i64,
    },
    /// Find employees in any department whose name contains a term
    Search {
        /// Search term (case-insensitive substring)
        term: String,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, log_file, notification_secs)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config.as_deref();

    // Commands that don't need the store
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), config_path, &output);
    }

    let config =
        Config::load(config_path).context("Failed to load configuration")?;

    // Handle TUI (default when no command given)
    let command = match cli.command {
        Some(Commands::Tui) | None => return tui::run(config),
        Some(command) => command,
    };

    init_cli_logging();

    let mut store = Store::open_with_config(config).context("Failed to open store")?;

    let result = match command {
        Commands::Department { command } => handle_department_command(command, &mut store, &output),
        Commands::Employee { command } => handle_employee_command(command, &mut store, &output),
        Commands::Status => commands::status::show(&store, &output),
        Commands::Tui | Commands::Config { .. } => unreachable!(), // Handled above
    };

    store.close().context("Failed to close store")?;
    result
}

fn handle_department_command(
    command: DepartmentCommands,
    store: &mut Store,
    output: &Output,
) -> Result<()> {
    match command {
        DepartmentCommands::Add { name } => commands::department::add(store, name, output),
        DepartmentCommands::List => commands::department::list(store, output),
        DepartmentCommands::Search { term } => commands::department::search(store, term, output),
        DepartmentCommands::Count { id } => commands::department::count(store, id, output),
    }
}

fn handle_employee_command(
    command: EmployeeCommands,
    store: &mut Store,
    output: &Output,
) -> Result<()> {
    match command {
        EmployeeCommands::Add { name, department } => {
            commands::employee::add(store, name, department, output)
        }
        EmployeeCommands::List { department } => {
            commands::employee::list(store, department, output)
        }
        EmployeeCommands::Search { term } => commands::employee::search(store, term, output),
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&Path>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

/// Initialize stderr logging for one-shot commands
///
/// Only initializes if COMPANY_LOG environment variable is set.
fn init_cli_logging() {
    let Ok(log_level) = std::env::var("COMPANY_LOG") else {
        return;
    };

    let env_filter = EnvFilter::new(format!(
        "company_core={},company={}",
        log_level, log_level
    ));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
