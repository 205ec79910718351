use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use modkit::{ModuleCtx, ModuleCtxBuilder};
use runtime::{AppConfig, AppConfigProvider, CliArgs, DatabaseConfig};
use sea_orm::DatabaseConnection;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use api_ingress::{ApiIngress, ApiIngressConfig};
use chore_assistant::config::ChoreAssistantConfig;
use chore_assistant::ChoreAssistant;
use chores_info::config::ChoresInfoConfig;
use chores_info::ChoresInfo;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

// Adapter to make AppConfigProvider implement modkit::ConfigProvider
struct ModkitConfigAdapter(Arc<AppConfigProvider>);

impl modkit::ConfigProvider for ModkitConfigAdapter {
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value> {
        self.0.get_module_config(module_name)
    }
}

/// Chores Server - family chore chart backend with a conversational assistant
#[derive(Parser)]
#[command(name = "chores-server")]
#[command(about = "Chores Server - family chore chart backend with a conversational assistant")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory SQLite database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
    /// Apply database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, config.home_dir());
    tracing::info!("Chores Server starting");

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
        Commands::Migrate => migrate(&config).await,
    }
}

fn database_config(config: &AppConfig) -> DatabaseConfig {
    config.database.clone().unwrap_or_else(|| {
        tracing::warn!("No database section found, using the default SQLite file");
        DatabaseConfig::default()
    })
}

fn module_ctx(config: &AppConfig, db: DatabaseConnection, cancel: CancellationToken) -> ModuleCtx {
    let provider = Arc::new(ModkitConfigAdapter(Arc::new(AppConfigProvider::new(
        config.clone(),
    ))));
    ModuleCtxBuilder::new(cancel)
        .with_config_provider(provider)
        .with_db(db)
        .build()
}

async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!("Initializing modules...");

    let db = runtime::connect_database(&database_config(&config), config.home_dir()).await?;
    let cancel = CancellationToken::new();
    let ctx = module_ctx(&config, db, cancel.clone());

    let chores = ChoresInfo::init(&ctx).await?;
    let assistant = ChoreAssistant::init(&ctx, chores.tools()).await?;
    let ingress = ApiIngress::from_ctx(&ctx, &config.server.host, config.server.port)?;

    let api = chores.router().merge(assistant.router());
    let router = ingress.build_router(api, vec![chores.openapi(), assistant.openapi()]);
    let listener = ingress.bind().await?;

    let signals = modkit::cancel_on_shutdown(cancel.clone());
    let served = ApiIngress::serve(listener, router, cancel.clone()).await;
    cancel.cancel();
    if let Err(e) = signals.await {
        tracing::warn!(error = %e, "shutdown signal task failed");
    }

    tracing::info!("Chores Server stopped");
    served
}

/// Parse every module section without touching the database.
fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    let db = database_config(config);
    runtime::detect_backend(&db.url)?;
    let ingress = config
        .module_config::<ApiIngressConfig>(api_ingress::MODULE_NAME)?
        .with_server_defaults(&config.server.host, config.server.port);
    ingress
        .bind_addr
        .parse::<std::net::SocketAddr>()
        .with_context(|| format!("invalid bind address '{}'", ingress.bind_addr))?;
    config.module_config::<ChoresInfoConfig>(chores_info::module::MODULE_NAME)?;
    config.module_config::<ChoreAssistantConfig>(chore_assistant::module::MODULE_NAME)?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}

async fn migrate(config: &AppConfig) -> Result<()> {
    let db = runtime::connect_database(&database_config(config), config.home_dir()).await?;
    ChoresInfo::migrate(&db).await?;
    println!("Migrations applied");
    Ok(())
}
