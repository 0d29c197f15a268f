use std::fs;
use std::path::PathBuf;

use clap::Parser;
use mlt::{format_float, Model};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(about = "A program to print the most likely tag and p*(t|w) of each word in a model.")]
struct Args {
    /// Input path of the model file
    #[arg(long)]
    model: PathBuf,

    /// Write the table as CSV to this path instead of printing it.
    #[arg(long)]
    csv: Option<PathBuf>,
}

#[derive(Serialize)]
struct WordTagRecord<'a> {
    word: &'a str,
    tag: &'a str,
    score: f64,
}

fn print_table(model: &Model) {
    let line = "-".repeat(100);
    println!("{line}");
    println!("{:<40}| {:<25}| {:<10}", "Word", "p*(t|w)", "Most Likely Tag");
    println!("{line}");
    for e in model.entries() {
        println!(
            "{:<40}| {:<25}| {:<10}",
            e.word(),
            format_float(e.score()),
            e.tag()
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    log::info!("Loading model file...");
    let mut f = zstd::Decoder::new(fs::File::open(args.model)?)?;
    let model = Model::read(&mut f)?;

    if let Some(path) = args.csv {
        log::info!("Saving CSV file...");
        let file = fs::File::create(path)?;
        let mut wtr = csv::Writer::from_writer(file);
        for e in model.entries() {
            wtr.serialize(WordTagRecord {
                word: e.word(),
                tag: e.tag(),
                score: e.score(),
            })?;
        }
        wtr.flush()?;
    } else {
        print_table(&model);
    }

    Ok(())
}
