//! Argument parsing and the driver's `Config`.
//!
//! There is no config file or environment-variable surface: the whole of
//! this crate's configuration is the parsed command line, built once from
//! `std::env::args()` and then passed by value through the pipeline. This
//! is the same `Config`/`Session` split the ambient stack uses for larger,
//! multi-file pipelines, scaled down to a single source file and a single
//! pass.

use std::path::PathBuf;

pub const USAGE: &str = "\
usage: minic <input.ts> [options]

options:
  --no-run, --gen-only   skip the interpreter pass (codegen still runs)
  --emit-tokens          print the token stream and exit
  --emit-ast             print the parsed AST and exit
  -v, --verbose          print one line per pipeline phase to stderr
  -h, --help             print this message and exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitMode {
    /// Run the full pipeline: interpret (unless skipped) then generate.
    Compile,
    Tokens,
    Ast,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub skip_interp: bool,
    pub emit: EmitMode,
    pub verbose: bool,
}

/// What [`Config::parse`] decided to do instead of building a `Config` —
/// either the user asked for `--help`, or the arguments were malformed.
pub enum ParseOutcome {
    Run(Config),
    Help,
}

impl Config {
    /// Parses `args` (expected to exclude the program name, i.e.
    /// `std::env::args().skip(1)`).
    pub fn parse(args: impl Iterator<Item = String>) -> Result<ParseOutcome, String> {
        let mut input = None;
        let mut skip_interp = false;
        let mut verbose = false;
        let mut emit = EmitMode::Compile;

        for arg in args {
            match arg.as_str() {
                "-h" | "--help" => return Ok(ParseOutcome::Help),
                "--no-run" | "--gen-only" => skip_interp = true,
                "--emit-tokens" => emit = EmitMode::Tokens,
                "--emit-ast" => emit = EmitMode::Ast,
                "-v" | "--verbose" => verbose = true,
                other if other.starts_with('-') => {
                    return Err(format!("unrecognized option '{other}'"));
                }
                other => {
                    if input.is_some() {
                        return Err(format!("unexpected extra argument '{other}'"));
                    }
                    input = Some(PathBuf::from(other));
                }
            }
        }

        let input = input.ok_or_else(|| "missing input file".to_string())?;
        Ok(ParseOutcome::Run(Config { input, skip_interp, emit, verbose }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(s: &[&str]) -> impl Iterator<Item = String> {
        s.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn minimal_invocation_just_needs_a_path() {
        let outcome = Config::parse(args(&["main.ts"])).unwrap();
        let ParseOutcome::Run(cfg) = outcome else { panic!("expected Run") };
        assert_eq!(cfg.input, PathBuf::from("main.ts"));
        assert!(!cfg.skip_interp);
        assert!(!cfg.verbose);
        assert_eq!(cfg.emit, EmitMode::Compile);
    }

    #[test]
    fn no_run_and_gen_only_are_aliases() {
        for flag in ["--no-run", "--gen-only"] {
            let outcome = Config::parse(args(&["main.ts", flag])).unwrap();
            let ParseOutcome::Run(cfg) = outcome else { panic!("expected Run") };
            assert!(cfg.skip_interp);
        }
    }

    #[test]
    fn help_short_circuits_before_requiring_a_path() {
        assert!(matches!(Config::parse(args(&["--help"])).unwrap(), ParseOutcome::Help));
        assert!(matches!(Config::parse(args(&["-h"])).unwrap(), ParseOutcome::Help));
    }

    #[test]
    fn missing_input_file_is_an_error() {
        assert!(Config::parse(args(&["--verbose"])).is_err());
    }

    #[test]
    fn two_positional_arguments_is_an_error() {
        assert!(Config::parse(args(&["a.ts", "b.ts"])).is_err());
    }

    #[test]
    fn unknown_flag_is_an_error() {
        assert!(Config::parse(args(&["main.ts", "--bogus"])).is_err());
    }

    #[test]
    fn emit_tokens_and_emit_ast_are_mutually_exclusive_with_the_last_one_winning() {
        let outcome = Config::parse(args(&["main.ts", "--emit-tokens", "--emit-ast"])).unwrap();
        let ParseOutcome::Run(cfg) = outcome else { panic!("expected Run") };
        assert_eq!(cfg.emit, EmitMode::Ast);
    }
}
