//! Core application

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::api::{ApiServer, AuthManager};
use crate::core::banner;
use crate::core::cli::{self, CliConfig, Commands, DbCommands};
use crate::core::config::AppConfig;
use crate::core::constants::ENV_LOG;
use crate::core::shutdown::ShutdownService;
use crate::data::PostgresService;
use crate::domain::AccountService;

pub struct CoreApp {
    pub shutdown: ShutdownService,
    pub config: AppConfig,
    pub database: Arc<PostgresService>,
    pub accounts: AccountService,
    pub auth: Arc<AuthManager>,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let (cli_config, command) = cli::parse();
        tracing::trace!(command = ?command, "Parsed command");

        match command {
            Some(Commands::Db { command: db_cmd }) => Self::handle_db_command(&cli_config, db_cmd).await,
            Some(Commands::Start) | None => {
                let app = Self::init(&cli_config).await?;
                Self::start_server(app).await
            }
        }
    }

    async fn init(cli: &CliConfig) -> Result<Self> {
        let config = AppConfig::load(cli)?;

        let database = Arc::new(
            PostgresService::init(&config.database)
                .await
                .context("Failed to initialize database")?,
        );
        let accounts = AccountService::new(database.pool().clone(), config.auth.accounts);
        let auth = Arc::new(AuthManager::new(&config.auth));
        let shutdown = ShutdownService::new(database.clone());

        Ok(Self {
            shutdown,
            config,
            database,
            accounts,
            auth,
        })
    }

    async fn handle_db_command(cli: &CliConfig, cmd: DbCommands) -> Result<()> {
        let config = AppConfig::load(cli)?;
        let database = PostgresService::connect(&config.database)
            .await
            .context("Failed to connect to the database")?;

        let result = match cmd {
            DbCommands::Provision => Self::provision(&database).await,
            DbCommands::Seed { force } => Self::seed(&database, force).await,
        };

        database.close().await;
        result
    }

    async fn provision(database: &PostgresService) -> Result<()> {
        let report = database.provision().await.context("Provisioning failed")?;
        if report.is_noop() {
            println!("All {} tables already exist.", report.existing.len());
        } else {
            println!("Created tables: {}", report.created.join(", "));
        }
        Ok(())
    }

    async fn seed(database: &PostgresService, force: bool) -> Result<()> {
        database.provision().await.context("Provisioning failed")?;
        let report = crate::domain::seed(database.pool(), force).await?;
        println!(
            "Inserted {} schools, {} students and {} grades.",
            report.schools, report.students, report.grades
        );
        Ok(())
    }

    fn init_logging() {
        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| default_log_filter());

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }

    async fn start_server(app: Self) -> Result<()> {
        // Install signal handlers FIRST (before any blocking calls)
        app.shutdown.install_signal_handlers();

        banner::print_banner(
            &app.config.server.host,
            app.config.server.port,
            app.config.auth.accounts.as_str(),
        );

        let server = ApiServer::new(app);
        let app = server.start().await?;
        app.shutdown.shutdown().await;

        Ok(())
    }
}

/// Filter used when neither log variable is set
fn default_log_filter() -> String {
    format!("info,{}=info", env!("CARGO_CRATE_NAME"))
}
