use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use toolmcp::{tools, ConfigLoader, McpServer, ToolRegistry};
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

/// Model Context Protocol tool server
///
/// Serves the registered tools to a single MCP client over stdin/stdout.
#[derive(Parser, Debug)]
#[command(name = "toolmcp")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file
    ///
    /// If not specified, looks for ./.toolmcp.toml, then $TOOLMCP_CONFIG,
    /// then ~/.config/toolmcp/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// SQLite database for the system log tools (overrides the config file)
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Log to file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the registered tools and exit
    #[arg(long)]
    list_tools: bool,
}

fn setup_logging(log_level: &str, log_file: Option<PathBuf>) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    // stdout carries protocol lines, never logs
    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true);

    if let Some(log_path) = log_file {
        let file = std::fs::File::create(log_path)?;
        subscriber.with_writer(file).init();
    } else {
        subscriber.with_writer(std::io::stderr).init();
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(&args.log_level, args.log_file)?;

    info!("Starting toolmcp v{}", env!("CARGO_PKG_VERSION"));

    let loader = match ConfigLoader::new(args.config.as_deref()) {
        Ok(loader) => loader,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let mut config = loader.into_config();
    if let Some(database) = args.database {
        config.system_log.database = Some(database);
    }

    let providers = match tools::builtin_providers(&config) {
        Ok(providers) => providers,
        Err(e) => {
            eprintln!("Failed to initialize tool providers: {}", e);
            return Err(e.into());
        }
    };

    let registry = ToolRegistry::from_providers(&providers);

    if args.list_tools {
        for (key, signature) in registry.list_all() {
            println!("{}\t{}", key, signature.description);
        }
        return Ok(());
    }

    let server = McpServer::new(Arc::new(registry), config.server);

    info!("toolmcp ready to accept MCP requests on stdio");

    // Run MCP server (this blocks until client disconnects)
    match server.run().await {
        Ok(()) => {
            info!("MCP server stopped normally");
        }
        Err(e) => {
            eprintln!("MCP server error: {}", e);
            return Err(e);
        }
    }

    Ok(())
}
