use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod context;

use context::AppContext;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Folio - view and edit portfolio content on a remote backend", long_about = None)]
struct Cli {
    /// Log filter (e.g. "info", "folio_application=debug")
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Keep the session in memory only; nothing is read from or written to disk
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Per-request deadline in milliseconds (overrides config and environment)
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Authenticate with the admin password and remember the token
    Login {
        #[arg(long)]
        url: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored admin token
    Logout,
    /// Show session and configuration state
    Status,
    /// Print the portfolio document (fallback content when no backend is set)
    Show {
        /// Print raw JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Set a top-level field: name, title or profile-image
    Set { field: String, value: String },
    /// Show or hide a page section
    Section { key: String, state: String },
    /// Set a project field: title, description or image
    ProjectSet {
        index: usize,
        field: String,
        value: String,
    },
    /// Replace a project's tags from comma-separated input
    Tags { index: usize, raw: String },
    /// Append a placeholder project
    AddProject,
    /// Remove the project at the given position
    RemoveProject { index: usize },
    /// Upload an image to "profile" or "project:<index>"
    Upload { target: String, path: String },
    /// Send a message through the contact form endpoint
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let ctx = AppContext::build(cli.ephemeral, cli.timeout_ms)?;

    match cli.command {
        Commands::Login { url, password } => commands::auth::login(&ctx, &url, &password).await?,
        Commands::Logout => commands::auth::logout(&ctx).await?,
        Commands::Status => commands::auth::status(&ctx).await?,
        Commands::Show { json } => commands::show::run(&ctx, json).await?,
        Commands::Set { field, value } => commands::edit::set(&ctx, &field, value).await?,
        Commands::Section { key, state } => commands::edit::section(&ctx, &key, &state).await?,
        Commands::ProjectSet {
            index,
            field,
            value,
        } => commands::edit::project_set(&ctx, index, &field, value).await?,
        Commands::Tags { index, raw } => commands::edit::tags(&ctx, index, raw).await?,
        Commands::AddProject => commands::edit::add_project(&ctx).await?,
        Commands::RemoveProject { index } => commands::edit::remove_project(&ctx, index).await?,
        Commands::Upload { target, path } => commands::edit::upload(&ctx, &target, &path).await?,
        Commands::Contact {
            name,
            email,
            message,
        } => commands::contact::run(&ctx, name, email, message).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "folio",
            "upload",
            "project:2",
            "shot.png",
            "--ephemeral",
            "--timeout-ms",
            "500",
        ])
        .unwrap();
        assert!(cli.ephemeral);
        assert_eq!(cli.timeout_ms, Some(500));
        assert!(matches!(cli.command, Commands::Upload { .. }));
    }
}
