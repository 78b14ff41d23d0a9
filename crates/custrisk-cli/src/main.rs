mod display;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use custrisk_core::{DEFAULT_FUNCTION_NAME, classify};
use custrisk_store::{DEFAULT_STAGE, Registration, RiskSession, Stage};

#[derive(Debug, Parser)]
#[command(name = "custrisk", version, about = "Customer risk classifier as a SQL function")]
struct Cli {
    /// Directory holding stage directories.
    #[arg(
        long,
        env = "CUSTRISK_STAGE_ROOT",
        default_value = ".custrisk/stages",
        global = true
    )]
    stage_root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify a single customer.
    Classify {
        #[arg(long)]
        age: Option<i64>,
        #[arg(long)]
        spend: Option<i64>,
    },
    /// Register the classifier as a permanent SQL function in a stage.
    Register {
        #[arg(long, default_value = DEFAULT_FUNCTION_NAME)]
        name: String,
        #[arg(long, default_value = DEFAULT_STAGE)]
        stage: String,
        /// Fail instead of overwriting an existing function of the same name.
        #[arg(long)]
        no_replace: bool,
    },
    /// List definitions in a stage.
    List {
        #[arg(long, default_value = DEFAULT_STAGE)]
        stage: String,
    },
    /// Show one staged definition.
    Describe {
        name: String,
        #[arg(long, default_value = DEFAULT_STAGE)]
        stage: String,
    },
    /// Remove a definition from a stage.
    Drop {
        name: String,
        #[arg(long, default_value = DEFAULT_STAGE)]
        stage: String,
    },
    /// Run SQL with the stage's functions loaded.
    Query {
        sql: String,
        #[arg(long, default_value = DEFAULT_STAGE)]
        stage: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    tracing::info!("custrisk v{}", env!("CARGO_PKG_VERSION"));
    let output = run(Cli::parse()).await?;
    print!("{output}");
    Ok(())
}

/// Execute a command and return what it prints on stdout.
async fn run(cli: Cli) -> anyhow::Result<String> {
    let output = match cli.command {
        Command::Classify { age, spend } => format!("{}\n", classify(age, spend)),
        Command::Register {
            name,
            stage,
            no_replace,
        } => {
            let mut session = RiskSession::with_stage(open_stage(&stage, &cli.stage_root)?)?;
            let reg = Registration::new(name)
                .permanent(true)
                .stage_location(stage)
                .replace(!no_replace);
            let def = session.register(&reg).context("registering function")?;
            format!("{} UDF registered successfully\n", def.name)
        }
        Command::List { stage } => {
            let stage = open_stage(&stage, &cli.stage_root)?;
            let defs = stage.list().context("reading stage")?;
            if defs.is_empty() {
                eprintln!("No functions in {}", stage.location());
            }
            defs.iter().map(display::definition_card).collect()
        }
        Command::Describe { name, stage } => {
            let stage = open_stage(&stage, &cli.stage_root)?;
            let def = stage
                .get(&name)
                .with_context(|| format!("reading {name}"))?;
            display::definition_card(&def)
        }
        Command::Drop { name, stage } => {
            let stage = open_stage(&stage, &cli.stage_root)?;
            stage
                .remove(&name)
                .with_context(|| format!("dropping {name}"))?;
            format!("{name} dropped from {}\n", stage.location())
        }
        Command::Query { sql, stage } => {
            let stage = open_stage(&stage, &cli.stage_root)?;
            let session = RiskSession::with_stage(stage)?;
            let batches = session.query(&sql).await.context("running query")?;
            format!("{}\n", arrow::util::pretty::pretty_format_batches(&batches)?)
        }
    };
    Ok(output)
}

fn open_stage(location: &str, root: &std::path::Path) -> anyhow::Result<Stage> {
    Stage::resolve(location, root).with_context(|| format!("opening stage {location}"))
}
