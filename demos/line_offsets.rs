//! Print the offset of every line end in a file.
//!
//! Usage: cargo run --example line_offsets -- <path>

use std::env;
use std::process::ExitCode;

use streamsource::{FileStream, InputSourceError, StreamInputSource};

fn run(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut source = StreamInputSource::new(FileStream::open(path)?)?;
    println!("scanning {}", source.name());

    loop {
        let end = source.find_and_skip_next_eol()?;
        let next = source.tell()?;
        println!("line end at {end}, next line at {next}");
        if next == end {
            break;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let Some(path) = env::args().nth(1) else {
        eprintln!("usage: line_offsets <path>");
        return ExitCode::FAILURE;
    };

    match run(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let invalid = matches!(
                e.downcast_ref::<InputSourceError>(),
                Some(InputSourceError::InvalidStream { .. })
            );
            if invalid {
                eprintln!("unusable stream: {e}");
            } else {
                eprintln!("error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}
