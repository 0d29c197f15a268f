use std::fs::File;
use std::io::{prelude::*, stderr};
use std::path::PathBuf;

use clap::Parser;
use mlt::{Corpus, Trainer};

#[derive(Parser, Debug)]
#[command(about = "A program to compute the most likely tag of each word in a tagged corpus.")]
struct Args {
    /// A training corpus of `word/tag` tokens
    #[arg(long)]
    corpus: PathBuf,

    /// The file to write the trained model to
    #[arg(long)]
    model: PathBuf,

    /// The zstd compression level of the model file
    #[arg(long, default_value = "19")]
    zstd_level: i32,

    /// Do not print the progress bar
    #[arg(long)]
    no_progress: bool,
}

const BAR_WIDTH: usize = 60;

fn print_progress_bar(i: usize, n: usize) -> std::io::Result<()> {
    let ratio = if n == 0 { 1.0 } else { i as f64 / n as f64 };
    let filled = (BAR_WIDTH as f64 * ratio) as usize;
    eprint!(
        "Training in progress: [{}{}] {:.1}% Complete\r",
        "=".repeat(filled),
        ".".repeat(BAR_WIDTH - filled),
        100.0 * ratio,
    );
    if i == n {
        eprintln!();
    }
    stderr().flush()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    log::info!("Loading {:?} ...", args.corpus);
    let corpus = Corpus::load_or_empty(&args.corpus);
    log::info!("# of tokens: {}", corpus.len());

    let trainer = Trainer::new(&corpus);
    let model = if args.no_progress {
        trainer.train()
    } else {
        // Redraws only when the displayed permille changes.
        let mut last = None;
        trainer.train_with_progress(|i, n| {
            let permille = if n == 0 { 1000 } else { i * 1000 / n };
            if last != Some(permille) {
                last = Some(permille);
                if let Err(e) = print_progress_bar(i, n) {
                    log::warn!("Could not print progress: {e}");
                }
            }
        })
    };
    log::info!("# of words: {}, # of tags: {}", model.len(), model.tag_set().len());

    log::info!("Saving model file...");
    let mut f = zstd::Encoder::new(File::create(args.model)?, args.zstd_level)?;
    model.write(&mut f)?;
    f.finish()?;

    Ok(())
}
