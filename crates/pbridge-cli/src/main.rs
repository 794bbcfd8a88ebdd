use anyhow::Context;
use clap::{Parser, Subcommand};
use pbridge::commands::{
    about,
    config::{self, ConfigAction},
    describe, list, plan, value,
};
use pbridge::GlobalOpts;
use pbridge_config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pbridge")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "CLI parameter bridge",
    long_about = "pbridge turns CLI tool descriptions into typed parameter wrappers and pipeline steps."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List tools in the configured catalogs
    List,
    /// Show a tool's parameters and the wrapper each one maps to
    Describe {
        tool: String,
        /// Print the parameter table as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create the wrapper for one parameter and print its value
    Value {
        tool: String,
        parameter: String,
        /// Edit the value through the wrapper's control before printing
        #[arg(long, value_name = "TEXT")]
        set: Option<String>,
    },
    /// Describe the pipeline step a tool registers as
    Plan {
        tool: String,
        /// Input parameter name (deduced from the input channel by default)
        #[arg(long)]
        input: Option<String>,
        /// Output parameter name (deduced from the output channel by default)
        #[arg(long)]
        output: Option<String>,
        /// Parameters to leave out of the step (repeatable)
        #[arg(long, value_name = "NAME")]
        exclude: Vec<String>,
    },
    /// Show the bridge module metadata
    About {
        /// Show the legacy bridge regardless of the configured flavor
        #[arg(long)]
        legacy: bool,
        /// Print the metadata as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configure pbridge
    #[command(subcommand_required = false, arg_required_else_help = false)]
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| pbridge_logger::verbosity_to_filter().into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .try_init();
}

fn run(cli: Cli, config: &Config) -> anyhow::Result<()> {
    let opts = &cli.global;
    match cli.command {
        Commands::List => list::list_tools(opts, config).context("Failed to list tools")?,
        Commands::Describe { tool, json } => describe::describe_tool(opts, config, &tool, json)
            .with_context(|| format!("Failed to describe '{}'", tool))?,
        Commands::Value {
            tool,
            parameter,
            set,
        } => value::show_value(opts, config, &tool, &parameter, set)
            .with_context(|| format!("Failed to read '{}' of '{}'", parameter, tool))?,
        Commands::Plan {
            tool,
            input,
            output,
            exclude,
        } => plan::plan_tool(
            opts,
            config,
            &tool,
            input.as_deref(),
            output.as_deref(),
            &exclude,
        )
        .with_context(|| format!("Failed to plan a pipeline step for '{}'", tool))?,
        Commands::About { legacy, json } => about::show_about(config, legacy, json)?,
        Commands::Config { action } => config::handle_config(action, opts)?,
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let loaded = Config::load();
    let config = loaded.as_ref().ok().cloned().unwrap_or_default();

    if let Err(e) = pbridge_logger::init_with_verbosity(cli.global.verbosity_level(&config)) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }
    init_tracing();

    if let Err(e) = &loaded {
        pbridge_logger::warn(&format!("Failed to load config, using defaults: {}", e));
    }

    if let Err(e) = run(cli, &config) {
        pbridge_logger::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
