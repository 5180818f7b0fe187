//! `rawpack <file>`: converts an image into a raw pixel dump, or a raw pixel
//! dump back into an image.

use std::{path::PathBuf, process::ExitCode};

use clap::{error::ErrorKind, Parser};
use rawpack::{convert_file, ConvertOptions};

const USAGE: &str = "Usage: rawpack <image_file>\n   or: rawpack <raw_file>";

/// Converts BMP/JPEG/PNG files into raw pixel dumps named
/// `<name>.<format>-<width>x<height>.raw`, and raw files named that way back
/// into PNG files.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
  /// The image or raw file to convert. Files ending in `.raw` are encoded,
  /// everything else is decoded.
  input: Option<PathBuf>,
}

fn main() -> ExitCode {
  env_logger::init();

  let cli = match Cli::try_parse() {
    Ok(cli) => cli,
    Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
      let _ = e.print();
      return ExitCode::SUCCESS;
    }
    Err(e) => {
      let _ = e.print();
      return ExitCode::FAILURE;
    }
  };
  let Some(input) = cli.input else {
    println!("{USAGE}");
    return ExitCode::SUCCESS;
  };

  match convert_file(&input, &ConvertOptions::default()) {
    Ok(done) => {
      println!(
        "{} \"{}\" into \"{}\" successfully.",
        done.direction.past_tense(),
        done.input.display(),
        done.output.display()
      );
      ExitCode::SUCCESS
    }
    Err(e) => {
      log::debug!("{e:?}");
      eprintln!("{e}");
      ExitCode::FAILURE
    }
  }
}
