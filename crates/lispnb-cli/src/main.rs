//! lispnb CLI - notebook tools for Lisp-family source files.

mod check;
mod colors;
mod join;
mod output;
mod process;
mod run;
mod split;

use clap::{Parser, Subcommand};
use lispnb_core::NotebookFormat;

#[derive(Parser)]
#[command(name = "lispnb")]
#[command(about = "Notebook tools for Lisp-family source files")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Line-comment marker that introduces prose blocks
    #[arg(long, global = true, default_value = ";;")]
    marker: String,

    /// Language tag for code cells
    #[arg(long, global = true, default_value = "clojure")]
    language: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a source file into notebook cells (JSON)
    Split {
        /// Path to the source file
        source: String,

        /// Write the JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Join notebook cells (JSON) back into source text
    Join {
        /// Path to the notebook JSON
        notebook: String,

        /// Write the source to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Check that a source file survives split and join unchanged
    Check {
        /// Path to the source file
        source: String,
    },

    /// Evaluate every code cell in order
    Run {
        /// Path to the source file
        source: String,

        /// Evaluator command; each form is written to its stdin.
        /// Split on whitespace without shell quoting, so arguments cannot
        /// contain spaces
        #[arg(long)]
        evaluator: String,

        /// Pretty-printer command; each result is written to its stdin
        #[arg(long)]
        pretty: Option<String>,

        /// Evaluation context (e.g. namespace), exported as LISPNB_CONTEXT
        #[arg(long)]
        context: Option<String>,

        /// Print one JSON object per cell instead of text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing::Level::DEBUG.into())
    } else {
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let format = NotebookFormat::new(cli.marker, cli.language);

    match cli.command {
        Commands::Split { source, output } => split::execute(&source, output.as_deref(), format)?,

        Commands::Join { notebook, output } => {
            join::execute(&notebook, output.as_deref(), format)?;
        }

        Commands::Check { source } => check::execute(&source, format)?,

        Commands::Run {
            source,
            evaluator,
            pretty,
            context,
            json,
        } => {
            let options = run::RunOptions {
                evaluator,
                pretty,
                context,
                json,
            };
            run::execute(&source, options, format).await?;
        }
    }

    Ok(())
}
