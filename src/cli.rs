//! Command line entry point of the `vetclinic` binary.

use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::{
    boot,
    config::Config,
    db,
    environment::{resolve_from_env, Environment, DEFAULT_ENVIRONMENT},
    logger, Result,
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Specify the environment
    #[arg(short, long, global = true, help = &format!("Specify the environment [default: {}]", DEFAULT_ENVIRONMENT))]
    environment: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an app
    Start {
        /// server bind address
        #[arg(short, long, action)]
        binding: Option<String>,
        /// server port address
        #[arg(short, long, action)]
        port: Option<i32>,
    },
    /// Perform DB operations
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Validate and diagnose configurations.
    Doctor,
}

#[derive(Subcommand)]
enum DbCommands {
    /// Migrate schema (up)
    Migrate,
    /// Load the bundled veterinarians and specialties
    Seed,
    /// Drop all tables, then migrate and seed again
    Reset,
    /// Run `SELECT 1` against the configured database
    Ping,
}

/// Parses the command line and runs the selected command.
///
/// # Errors
/// Returns the error of the command that ran.
pub async fn main() -> Result<()> {
    let cli = Cli::parse();
    let environment: Environment = cli.environment.unwrap_or_else(resolve_from_env).into();

    let config = environment.load()?;
    logger::init(&config.logger)?;

    match cli.command {
        Commands::Start { binding, port } => {
            let binding = binding.unwrap_or_else(|| config.server.binding.clone());
            let port = port.unwrap_or(config.server.port);
            let ctx = boot::create_context(&environment, config).await?;
            boot::start(ctx, &binding, port).await?;
        }
        Commands::Db { command } => run_db(&environment, config, command).await?,
        Commands::Doctor => {
            if !doctor(&config).await {
                std::process::exit(1);
            }
        }
    }
    Ok(())
}

async fn run_db(environment: &Environment, config: Config, command: DbCommands) -> Result<()> {
    match command {
        DbCommands::Ping => {
            let conn = db::connect(&config.database).await?;
            println!("Result: {}", db::ping(&conn).await?);
        }
        DbCommands::Migrate => {
            let conn = db::connect(&config.database).await?;
            db::migrate(&conn).await?;
            println!("{}", "migrations applied".green());
        }
        DbCommands::Seed => {
            let ctx = boot::create_context(environment, config).await?;
            let inserted = db::seed(&ctx.db, &db::Fixtures::bundled()?).await?;
            println!("{} {inserted} vets", "seeded".green());
        }
        DbCommands::Reset => {
            let ctx = boot::create_context(environment, config).await?;
            db::reset(&ctx.db).await?;
            let inserted = db::seed(&ctx.db, &db::Fixtures::bundled()?).await?;
            println!("{} {inserted} vets", "reset and seeded".green());
        }
    }
    Ok(())
}

async fn doctor(config: &Config) -> bool {
    println!("{} configuration loaded", "✅".green());
    match db::connect(&config.database).await {
        Ok(conn) => match db::ping(&conn).await {
            Ok(_) => {
                println!("{} DB connection: success", "✅".green());
                true
            }
            Err(err) => {
                println!("{} DB connectivity check failed: {err}", "❌".red());
                false
            }
        },
        Err(err) => {
            println!("{} DB connection: fails: {err}", "❌".red());
            false
        }
    }
}
