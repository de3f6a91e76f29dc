//! Times generating and serializing the default number of rows.
//! can be run with `cargo run --release --example benchmark`

use std::error::Error;
use std::io;
use std::time::Instant;

use log::warn;

use blacklist_gen::config::GeneratorConfig;
use blacklist_gen::generator::RowGenerator;
use blacklist_gen::writer::{csv_writer, write_records};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = GeneratorConfig::default().with_seed(Some(0));

    let start = Instant::now();
    let generator = RowGenerator::new(&config.vocabulary, config.rng())?;
    let generated = generator.generate_all(config.rows).count();
    warn!("Generating {} rows took: {:.2?}", generated, start.elapsed());

    let start_writing = Instant::now();
    let generator = RowGenerator::new(&config.vocabulary, config.rng())?;
    let mut writer = csv_writer(io::sink());
    write_records(generator.generate_all(config.rows), &mut writer)?;
    warn!("Generating and writing took: {:.2?}", start_writing.elapsed());

    warn!("Total took: {:.2?}", start.elapsed());

    Ok(())
}
