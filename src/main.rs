use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use strata::{ConfigLoader, ConfigNode, ConfigStore, ExecutionContext, Orchestrator};

#[derive(Parser)]
#[command(
    name = "strata",
    about = "Layered configuration resolver with project and environment overrides",
    version
)]
struct Cli {
    /// Path to the configuration directory
    #[arg(short, long, default_value = "config")]
    dir: PathBuf,

    /// Project identifier (overrides APP_PROJECT)
    #[arg(long)]
    project: Option<String>,

    /// Environment identifier (overrides APP_ENV)
    #[arg(long)]
    env: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Resolve configuration prefixes and print the result
    Resolve {
        /// Prefixes to resolve (defaults to every discovered prefix)
        prefixes: Vec<String>,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Print a single value by dotted key, e.g. app.cache.ttl
    Get {
        key: String,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// List discovered configuration prefixes
    Prefixes,
    /// Show which layers a prefix draws from
    Layers {
        prefix: String,
    },
    /// Resolve every prefix and report errors
    Check,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Format {
    Json,
    Toml,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    strata::logging::init(cli.verbose);

    let context = ExecutionContext::from_env()
        .with_project(cli.project.as_deref())
        .with_environment(cli.env.as_deref());
    let loader = ConfigLoader::new(&cli.dir);

    match cli.command {
        Commands::Resolve { prefixes, format } => {
            let prefixes = if prefixes.is_empty() {
                loader.discover_prefixes()?
            } else {
                prefixes
            };
            let orch = Orchestrator::new(&loader, context);
            let mut store = ConfigStore::new();
            orch.resolve_all(&prefixes, &mut store)?;
            println!("{}", render(&store.to_node(), format)?);
        }
        Commands::Get { key, format } => {
            let prefixes = loader.discover_prefixes()?;
            let orch = Orchestrator::new(&loader, context);
            let mut store = ConfigStore::new();
            orch.resolve_all(&prefixes, &mut store)?;

            match store.get_path(&key) {
                Some(node) => println!("{}", render(node, format)?),
                None => {
                    eprintln!("error: key not found: {key}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Prefixes => {
            let prefixes = loader.discover_prefixes()?;
            if prefixes.is_empty() {
                eprintln!(
                    "warning: no configuration files found in {}",
                    loader.base_dir().display()
                );
            }
            for prefix in prefixes {
                println!("{prefix}");
            }
        }
        Commands::Layers { prefix } => {
            let orch = Orchestrator::new(&loader, context);
            let layers = orch.layers(&prefix)?;
            println!("{}", serde_json::to_string_pretty(&layers)?);
        }
        Commands::Check => {
            let prefixes = loader.discover_prefixes()?;
            let orch = Orchestrator::new(&loader, context);
            let mut errors: Vec<String> = Vec::new();

            for prefix in &prefixes {
                if let Err(e) = orch.resolve(prefix) {
                    errors.push(format!("'{prefix}': {e:#}"));
                }
            }

            if errors.is_empty() {
                println!("Configuration is valid.");
            } else {
                eprintln!("Configuration errors:");
                for err in &errors {
                    eprintln!("  - {err}");
                }
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn render(node: &ConfigNode, format: Format) -> Result<String> {
    match format {
        Format::Json => serde_json::to_string_pretty(node).context("failed to render JSON"),
        Format::Toml => toml::to_string_pretty(node)
            .context("failed to render TOML (only tables without nulls can be written as TOML)"),
    }
}
