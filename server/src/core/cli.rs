use clap::{Parser, Subcommand};

use std::path::PathBuf;

use super::config::AccountTable;
use super::constants::{
    ENV_ACCOUNTS, ENV_CONFIG, ENV_HOST, ENV_PORT, ENV_POSTGRES_URL, ENV_SESSION_SECRET,
};

#[derive(Parser)]
#[command(name = "barters")]
#[command(version, about = "School statistics dashboard and barter marketplace", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Server host address
    #[arg(long, short = 'H', global = true, env = ENV_HOST)]
    pub host: Option<String>,

    /// Server port
    #[arg(long, short = 'p', global = true, env = ENV_PORT)]
    pub port: Option<u16>,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// PostgreSQL connection URL
    #[arg(long, global = true, env = ENV_POSTGRES_URL)]
    pub postgres_url: Option<String>,

    /// Secret used to sign session cookies (random per process if unset)
    #[arg(long, global = true, env = ENV_SESSION_SECRET, hide_env_values = true)]
    pub session_secret: Option<String>,

    /// Account table used by login and registration (barter or dashboard)
    #[arg(long, global = true, env = ENV_ACCOUNTS, value_parser = parse_account_table)]
    pub accounts: Option<AccountTable>,
}

/// Parse account table from CLI/env string
fn parse_account_table(s: &str) -> Result<AccountTable, String> {
    match s.to_lowercase().as_str() {
        "barter" | "users" => Ok(AccountTable::Barter),
        "dashboard" | "user" => Ok(AccountTable::Dashboard),
        _ => Err(format!(
            "Invalid account table '{}'. Valid options: barter, dashboard",
            s
        )),
    }
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Start the server (default command)
    Start,
    /// Database maintenance commands
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Subcommand, Clone, Debug)]
pub enum DbCommands {
    /// Create any missing tables and exit
    Provision,
    /// Insert sample schools, students and grades
    Seed {
        /// Seed even when schools already exist
        #[arg(short, long)]
        force: bool,
    },
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub config: Option<PathBuf>,
    pub postgres_url: Option<String>,
    pub session_secret: Option<String>,
    pub accounts: Option<AccountTable>,
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Option<Commands>) {
    let cli = Cli::parse();
    let config = CliConfig {
        host: cli.host,
        port: cli.port,
        config: cli.config,
        postgres_url: cli.postgres_url,
        session_secret: cli.session_secret,
        accounts: cli.accounts,
    };
    (config, cli.command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_account_table() {
        assert_eq!(parse_account_table("barter"), Ok(AccountTable::Barter));
        assert_eq!(parse_account_table("USERS"), Ok(AccountTable::Barter));
        assert_eq!(
            parse_account_table("dashboard"),
            Ok(AccountTable::Dashboard)
        );
        assert!(parse_account_table("ledger").is_err());
    }

    #[test]
    fn test_db_seed_subcommand() {
        let cli = Cli::try_parse_from(["barters", "db", "seed", "--force"]).unwrap();
        match cli.command {
            Some(Commands::Db {
                command: DbCommands::Seed { force },
            }) => assert!(force),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["barters", "start", "--port", "8080"]).unwrap();
        assert_eq!(cli.port, Some(8080));
        assert!(matches!(cli.command, Some(Commands::Start)));
    }
}
