use clap::Parser;
use etd::cli::{Cli, Commands};
use etd::cli_handlers;
use etd::mcp::run_mcp_server;
use etd::settings::Settings;
use std::process;

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Add { name, list } => cli_handlers::handle_add(&name, list),
        Commands::List { all, list } => cli_handlers::handle_list(all, list),
        Commands::Toggle { index, list } => cli_handlers::handle_toggle(index, list),
        Commands::Rename { index, name, list } => cli_handlers::handle_rename(index, &name, list),
        Commands::Remove { index, list } => cli_handlers::handle_remove(index, list),
        Commands::Lists => cli_handlers::handle_lists(),
        Commands::AddList { name } => cli_handlers::handle_add_list(name.as_deref()),
        Commands::RenameList { index, name } => cli_handlers::handle_rename_list(index, &name),
        Commands::RemoveList { index } => cli_handlers::handle_remove_list(index),
        Commands::Use { index } => cli_handlers::handle_use(index),
        Commands::ShowCompleted { value } => cli_handlers::handle_show_completed(value),
        Commands::Logging { value } => cli_handlers::handle_logging(value),
        Commands::Reset => cli_handlers::handle_reset(),
        Commands::Mcp => {
            if let Err(e) = run_mcp_server().await {
                eprintln!("MCP server error: {e}");
                process::exit(1);
            }
            return;
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Wire up tracing. `RUST_LOG` always wins; the persisted logging toggle
/// turns on the crate's own debug output when no filter is set. Output goes
/// to stderr so it never mixes with command output or the MCP stdio
/// transport.
fn init_tracing() {
    let settings = Settings::load_current_dir().unwrap_or_default();

    let filter = if settings.enable_logging {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("etd=debug"))
    } else {
        tracing_subscriber::EnvFilter::from_default_env()
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
