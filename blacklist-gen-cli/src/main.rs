use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use blacklist_gen::config::{validate_row_count, GeneratorConfig, DEFAULT_OUTPUT, DEFAULT_ROWS};
use blacklist_gen::error::GenError;
use blacklist_gen::writer::generate_table;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Number of rows to generate
    #[clap(short = 'n', long, default_value_t = i64::from(DEFAULT_ROWS), allow_hyphen_values = true)]
    pub(crate) rows: i64,
    /// The output CSV file, truncated if it exists
    #[clap(short, long, default_value = DEFAULT_OUTPUT)]
    pub(crate) output: PathBuf,
    /// Seed for reproducible output
    #[clap(short, long)]
    pub(crate) seed: Option<u64>,
}

fn run(cli: Cli) -> Result<(), GenError> {
    let rows = validate_row_count(cli.rows)?;
    let config = GeneratorConfig::new(rows, cli.output).with_seed(cli.seed);
    let summary = generate_table(&config)?;
    println!(
        "Generated {} rows of data in {}",
        summary.rows_written,
        config.output.display()
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Generation failed: {:?}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
