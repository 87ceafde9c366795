//! The compiler driver: argument parsing, file I/O, and pipeline
//! orchestration for the front end, interpreter, and code generator.
//!
//! This crate's pipeline is deliberately thin next to a multi-file,
//! multi-stage compiler driver: one source file in, one `.asm` file out,
//! no incremental cache, no linking step — the external assembler/linker
//! toolchain that would consume the emitted `.asm` is outside this crate's
//! scope entirely.

mod cli;
mod error;
mod pipeline;
mod preprocess;

pub use cli::{Config, EmitMode, ParseOutcome, USAGE};
pub use pipeline::Session;

/// Parses `std::env::args()`, runs the pipeline, and returns the process
/// exit code — `0` on success, `1` on any pipeline failure or I/O error.
/// `--help` prints usage and returns `0` without touching the filesystem.
pub fn run() -> i32 {
    let args = std::env::args().skip(1);
    match Config::parse(args) {
        Ok(ParseOutcome::Help) => {
            println!("{USAGE}");
            0
        }
        Ok(ParseOutcome::Run(config)) => {
            let mut session = Session::new(config);
            match session.run() {
                Ok(_) => 0,
                Err(e) => {
                    eprintln!("{}", error::diagnostic_of(&e).render_short());
                    1
                }
            }
        }
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!("{USAGE}");
            1
        }
    }
}
