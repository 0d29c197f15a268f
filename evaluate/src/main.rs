use std::fs::{self, File};
use std::path::PathBuf;

use clap::Parser;
use mlt::{Corpus, Evaluator, Model};

#[derive(Parser, Debug)]
#[command(about = "A program to compute the confusion matrix of a model against a golden standard.")]
struct Args {
    /// The model file to evaluate
    #[arg(long)]
    model: PathBuf,

    /// A golden standard corpus of `word/tag` tokens
    #[arg(long)]
    golden: PathBuf,

    /// The file to write the confusion matrix report to
    #[arg(long, default_value = "confusion_matrix.txt")]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    log::info!("Loading model file...");
    let mut f = zstd::Decoder::new(File::open(&args.model)?)?;
    let model = Model::read(&mut f)?;

    log::info!("Loading {:?} ...", args.golden);
    let golden = Corpus::load_or_empty(&args.golden);
    log::info!("# of tokens: {}", golden.len());

    let evaluation = Evaluator::new(&model).evaluate(&golden);

    log::info!("Saving confusion matrix...");
    fs::write(&args.output, evaluation.to_string())?;
    eprintln!(
        "The confusion matrix might be too wide for the console, it was written to {:?}.",
        args.output
    );
    eprintln!("Disable line wrapping in your editor to view it.");

    println!(
        "Total Errors: {} ({} of which are due to unknown words)",
        evaluation.total_errors(),
        evaluation.total_unknown_word_errors()
    );
    match evaluation.accuracy() {
        Some(accuracy) => println!("Accuracy: {}", accuracy),
        None => println!("Accuracy: n/a"),
    }

    Ok(())
}
