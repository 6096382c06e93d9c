mod logging;
mod scaffold;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use dialoguer::Confirm;

use web_builder_core::config::Config;
use web_builder_core::project::ProjectStore;
use web_builder_core::project_store::FsProjectStore;
use web_builder_server::ServerState;

#[derive(Parser)]
#[command(
    name = "visual-web-builder",
    about = "Visual Web Builder - Create websites without coding",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Visual Web Builder
    Start {
        /// Port to run on (default: 3000)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to run on (default: localhost)
        #[arg(long)]
        host: Option<String>,
    },

    /// Initialize a new project
    Init {
        /// Name of the project directory to create
        name: String,
    },

    /// Build the project for production
    Build {
        /// Output directory
        #[arg(short, long, default_value = "dist")]
        output: PathBuf,
    },

    /// Serve the built project
    Serve {
        /// Port to serve on
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
    },

    /// Saved project management
    Projects {
        #[command(subcommand)]
        action: ProjectAction,
    },
}

#[derive(Subcommand)]
enum ProjectAction {
    /// List saved projects
    List,
    /// Delete a saved project
    Delete {
        name: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load config
    let config_path = cli
        .config
        .map(PathBuf::from)
        .unwrap_or_else(Config::config_path);

    let config = Config::load(&config_path)?;

    logging::init(cli.verbose, config.logging.as_ref());

    let (warnings, errors) = config.validate();
    for warning in &warnings {
        tracing::warn!("Config: {warning}");
    }
    if !errors.is_empty() {
        for error in &errors {
            tracing::error!("Config: {error}");
        }
        anyhow::bail!("Invalid configuration in {}", config_path.display());
    }

    match cli.command {
        Commands::Start { port, host } => {
            let port = port.unwrap_or_else(|| config.server_port());
            let host = host.unwrap_or_else(|| config.server_host());
            tracing::info!("Starting Visual Web Builder on http://{host}:{port}");
            tracing::info!(dir = %config.projects_dir().display(), "Projects directory");

            let state = Arc::new(ServerState::from_config(config));
            web_builder_server::start_server(state, &host, port).await?;
            tracing::info!("Server stopped");
        }
        Commands::Init { name } => {
            let cwd = std::env::current_dir()?;
            let dir = scaffold::init_project(&cwd, &name)?;
            println!("Project {name} created successfully!");
            println!("Project location: {}", dir.display());
            println!("To start building: cd {name} && visual-web-builder start");
        }
        Commands::Build { output } => {
            let written = web_builder_web::write_assets(&output)?;
            tracing::info!(files = written, "Build completed");
            println!("Build completed! Output: {}", output.display());
        }
        Commands::Serve { port } => {
            web_builder_server::serve_static(&PathBuf::from("dist"), port).await?;
        }
        Commands::Projects { action } => {
            let store = FsProjectStore::new(config.projects_dir());
            match action {
                ProjectAction::List => {
                    let projects = store.list().await;
                    if projects.is_empty() {
                        println!("No saved projects in {}", store.base().display());
                    }
                    for name in projects {
                        println!("{name}");
                    }
                }
                ProjectAction::Delete { name, yes } => {
                    let confirmed = yes
                        || Confirm::new()
                            .with_prompt(format!(
                                "Are you sure you want to delete project \"{name}\"?"
                            ))
                            .default(false)
                            .interact()?;
                    if confirmed {
                        store.delete(&name).await?;
                        println!("Deleted project {name}");
                    } else {
                        println!("Cancelled");
                    }
                }
            }
        }
    }

    Ok(())
}
