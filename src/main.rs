use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use relique_dash::{
    api::HttpApi,
    app::App,
    config::{Config, ConfigLoader, ConfigValidator},
    globals,
};

#[derive(Parser)]
#[command(name = "relique-dash")]
#[command(about = "Terminal dashboard for a Relique backup server", long_about = None)]
struct Cli {
    /// Path to the YAML configuration file; every setting has a default
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Relique server URL, overrides server.url
    #[arg(long, env = "RELIQUE_URL")]
    url: Option<String>,

    /// Route to open first, e.g. /clients or /jobs/<uuid>
    #[arg(long)]
    route: Option<String>,

    /// Accept self-signed server certificates
    #[arg(long)]
    insecure: bool,

    /// Validate config and exit (don't run TUI)
    #[arg(long)]
    validate: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(cli: &Cli) -> color_eyre::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            println!("Loading config from: {:?}", path);
            ConfigLoader::load_from_file(path)
                .map_err(|e| color_eyre::eyre::eyre!("Failed to load config: {:#}", e))?
        }
        None => Config::default(),
    };

    if let Some(url) = &cli.url {
        config.server.url = url.clone();
    }
    if let Some(route) = &cli.route {
        config.ui.start = route.clone();
    }
    if cli.insecure {
        config.server.insecure = true;
    }

    if let Err(e) = ConfigValidator::validate(&config) {
        eprintln!("✗ Config validation failed: {}", e);
        eprintln!("\nFull error chain:");
        for cause in e.chain() {
            eprintln!("  - {}", cause);
        }
        std::process::exit(1);
    }
    Ok(config)
}

fn init_logging(config: &Config, verbose: bool) -> color_eyre::Result<()> {
    let path = config.logging.file_path();
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;

    let level = if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    if cli.validate {
        println!("✓ Configuration is valid!");
        return Ok(());
    }

    if cli.verbose {
        println!("\nConfig Summary:");
        println!("  Server: {}{}", config.server.url, config.server.api_prefix);
        println!("  Start route: {}", config.ui.start);
        println!("  Theme: {}", config.ui.theme.as_str());
        println!("  Log file: {:?}", config.logging.file_path());
        println!();
    }

    init_logging(&config, cli.verbose)?;
    globals::init_http_client(&config.server)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to initialize HTTP client: {}", e))?;
    let api = HttpApi::new(&config.server).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    tracing::info!("Connecting to {}", api.base());

    let terminal = ratatui::init();
    let result = App::new(config, Arc::new(api))
        .run(terminal)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("{}", e));
    ratatui::restore();
    result
}
