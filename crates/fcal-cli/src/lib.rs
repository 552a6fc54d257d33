//! FCAL CLI library
//!
//! Reads an FCAL file, translates it and writes the result to a file or
//! standard output.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Emit};

use std::{fs, io::Write};

use log::info;

use fcal::{FcalError, Translator};

/// Run the FCAL CLI application
///
/// # Errors
///
/// Returns `FcalError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Lowering errors
pub fn run(args: &Args) -> Result<(), FcalError> {
    info!(
        input_path = args.input,
        output_path:? = args.output,
        emit:? = args.emit;
        "Translating program"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let output = translate(&Translator::new(app_config), &source, args.emit)?;

    match &args.output {
        Some(path) => {
            fs::write(path, output)?;
            info!(output_file = path; "Output written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

/// Produce the requested output form for `source`.
pub fn translate(translator: &Translator, source: &str, emit: Emit) -> Result<String, FcalError> {
    match emit {
        Emit::Cpp => translator.translate(source),
        Emit::Fcal => translator.canonicalize(source),
    }
}
