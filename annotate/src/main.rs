use std::ffi::OsString;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use clap::Parser;
use mlt::{Annotator, Model};

#[derive(Parser, Debug)]
#[command(about = "A program to annotate free text with the most likely tag of each word.")]
struct Args {
    /// The model file to use when annotating text
    #[arg(long)]
    model: PathBuf,

    /// The text file to annotate
    #[arg(long)]
    input: PathBuf,
}

/// `dir/name` becomes `dir/annotated_name`.
fn annotated_path(input: &Path) -> Option<PathBuf> {
    let mut name = OsString::from("annotated_");
    name.push(input.file_name()?);
    Some(input.with_file_name(name))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    log::info!("Loading model file...");
    let mut f = zstd::Decoder::new(File::open(&args.model)?)?;
    let model = Model::read(&mut f)?;

    let text = match fs::read_to_string(&args.input) {
        Ok(text) => text,
        Err(e) => {
            log::error!("Could not open {}: {e}", args.input.display());
            return Ok(());
        }
    };
    let Some(output) = annotated_path(&args.input) else {
        log::error!("Invalid input file name: {}", args.input.display());
        return Ok(());
    };

    let annotator = Annotator::new(&model);
    let annotated = annotator.annotate(&text);

    log::info!("Saving annotated file...");
    fs::write(&output, &annotated)?;
    eprintln!("File {:?} created", output);
    println!("{annotated}");

    Ok(())
}
