// src/main.rs
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use report_extractor::extractors::{self, ALL_SECTIONS};
use report_extractor::report::{ExtractionResult, ReportSummary};
use report_extractor::runner::{self, program, ReportProgram};
use report_extractor::storage::{self, StorageManager};
use report_extractor::utils::{self, AppError};

/// Command Line Interface for the social-network report extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile and run the report program, then extract its output
    Run {
        /// Source file of the report program
        #[arg(long, default_value = program::DEFAULT_SOURCE)]
        source: PathBuf,

        /// Path of the compiled executable
        #[arg(long, default_value = program::DEFAULT_EXECUTABLE)]
        executable: PathBuf,

        /// Compiler used to build the program
        #[arg(long, env = "REPORT_COMPILER", default_value = program::DEFAULT_COMPILER)]
        compiler: String,

        /// Compilation timeout in seconds
        #[arg(long, env = "REPORT_COMPILE_TIMEOUT", default_value_t = program::DEFAULT_COMPILE_TIMEOUT.as_secs())]
        compile_timeout: u64,

        /// Execution timeout in seconds
        #[arg(long, env = "REPORT_RUN_TIMEOUT", default_value_t = program::DEFAULT_RUN_TIMEOUT.as_secs())]
        run_timeout: u64,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Extract a report that was already produced (file path, or `-` for stdin)
    Parse {
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Load a saved snapshot and print its summary
    Show {
        snapshot: PathBuf,

        /// Print the snapshot as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Output directory for snapshots
    #[arg(short, long, env = "REPORT_OUTPUT_DIR", default_value = "./output")]
    output_dir: PathBuf,

    /// Base file name for the saved snapshot
    #[arg(short, long, default_value = "resultados")]
    name: String,

    /// Overwrite existing snapshot files
    #[arg(short, long)]
    force: bool,

    /// Debug mode - save the raw report annotated with section boundaries
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let cli = Cli::parse();
    tracing::info!("Starting processing for args: {:?}", cli);

    match cli.command {
        Command::Run { source, executable, compiler, compile_timeout, run_timeout, output } => {
            let mut report_program = ReportProgram::new(source, executable);
            report_program.compiler = compiler;
            report_program.compile_timeout = Duration::from_secs(compile_timeout);
            report_program.run_timeout = Duration::from_secs(run_timeout);

            let result = runner::analyze(&mut report_program).await?;
            finish(&result, &output)
        }
        Command::Parse { input, output } => {
            let raw = read_input(&input)?;
            if raw.trim().is_empty() {
                return Err(AppError::Config(format!("No report text in {}", input.display())));
            }
            let result = extractors::aggregate(&raw);
            finish(&result, &output)
        }
        Command::Show { snapshot, json } => {
            let result = storage::load_snapshot(&snapshot)?;
            if json {
                let text = serde_json::to_string_pretty(&result)
                    .map_err(|e| AppError::Storage(utils::StorageError::SerializationError(e.to_string())))?;
                println!("{}", text);
            } else {
                println!("{}", ReportSummary::from_result(&result));
            }
            Ok(())
        }
    }
}

fn read_input(input: &Path) -> Result<String, AppError> {
    if input == Path::new("-") {
        let mut raw = String::new();
        std::io::stdin().read_to_string(&mut raw)?;
        return Ok(raw);
    }
    Ok(std::fs::read_to_string(input)?)
}

/// Saves the snapshot set and logs its summary.
fn finish(result: &ExtractionResult, output: &OutputArgs) -> Result<(), AppError> {
    let storage = StorageManager::new(&output.output_dir, output.force)?;

    if output.debug {
        let debug_path = storage.base_dir().join(format!("{}_annotated.txt", output.name));
        if let Err(e) = utils::text_debug::save_debug_report(&result.raw_text, &debug_path, &ALL_SECTIONS) {
            tracing::warn!("Failed to create annotated report: {}", e);
        }
    }

    if result.record_count() == 0 {
        tracing::warn!("No structured records found; only the raw output will be useful");
    }

    for path in storage.save_all(result, &output.name)? {
        tracing::info!("Wrote {}", path.display());
    }

    for line in ReportSummary::from_result(result).to_string().lines() {
        tracing::info!("{}", line);
    }
    Ok(())
}
