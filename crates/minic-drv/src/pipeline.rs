//! Orchestrates one run of the pipeline: read -> preprocess -> lex+parse ->
//! (optional emit-tokens/emit-ast bypass) -> interpret (unless skipped) ->
//! generate -> write `<input>.asm`.
//!
//! This is the scaled-down `Session` half of the `Config`/`Session` split:
//! built once from a [`Config`], it owns the interner and the loaded
//! source for the single file this crate ever compiles in one run.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use minic_lex::Lexer;
use minic_par::{ParseError, Parser};
use minic_util::{Interner, SourceFile, Span, Tag};

use crate::cli::{Config, EmitMode};
use crate::error::tagged;
use crate::preprocess::strip_comments;

pub struct Session {
    config: Config,
    interner: Interner,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self { config, interner: Interner::new() }
    }

    fn log(&self, phase: &str) {
        if self.config.verbose {
            eprintln!("{phase}");
        }
    }

    /// Runs the configured pipeline to completion, returning the path
    /// written on success (`None` for `--emit-tokens`/`--emit-ast`, which
    /// print to standard output and never reach code generation).
    pub fn run(&mut self) -> Result<Option<std::path::PathBuf>> {
        self.log("reading");
        let content = fs::read_to_string(&self.config.input)
            .with_context(|| format!("could not read {}", self.config.input.display()))?;
        let source = SourceFile::new(self.config.input.display().to_string(), content);

        self.log("preprocessing");
        let stripped = strip_comments(source.content());

        self.log("lexing");

        if self.config.emit == EmitMode::Tokens {
            let tokens = collect_tokens(&stripped, &self.interner)?;
            for tok in &tokens {
                println!("{:?} {:?} {:?}", tok.kind, tok.value, tok.span);
            }
            return Ok(None);
        }

        self.log("parsing");
        let parser = Parser::new(&stripped, &self.interner).map_err(tagged_parse_error)?;
        let (ast, root) = parser.parse_program().map_err(tagged_parse_error)?;

        if self.config.emit == EmitMode::Ast {
            println!("{:#?}", ast);
            return Ok(None);
        }

        if !self.config.skip_interp {
            self.log("interpreting");
            minic_interp::run(&ast, root, &self.interner)
                .map_err(|e| tagged(Tag::Semantic, Span::DUMMY, e))?;
        }

        self.log("generating");
        let asm = minic_gen::generate(&ast, root, &self.interner)
            .map_err(|e| tagged(e.tag(), Span::DUMMY, e))?;

        let output_path = asm_output_path(&self.config.input);
        self.log(&format!("writing {}", output_path.display()));
        fs::write(&output_path, asm)
            .with_context(|| format!("could not write {}", output_path.display()))?;

        Ok(Some(output_path))
    }
}

fn collect_tokens<'a>(source: &'a str, interner: &'a Interner) -> Result<Vec<minic_lex::Token>> {
    let mut lexer = Lexer::new(source, interner);
    lexer.advance().map_err(|e| tagged(Tag::Lexer, e.span(), e))?;
    let mut tokens = Vec::new();
    loop {
        let tok = lexer.current().expect("advance always leaves a token").clone();
        let is_eof = tok.kind == minic_lex::TokenKind::Eof;
        tokens.push(tok);
        if is_eof {
            break;
        }
        lexer.advance().map_err(|e| tagged(Tag::Lexer, e.span(), e))?;
    }
    Ok(tokens)
}

fn asm_output_path(input: &Path) -> std::path::PathBuf {
    input.with_extension("asm")
}

/// A `ParseError::Lex` is a lexer failure that only surfaced while the
/// parser was pulling its next token — tag it `Lexer`, not `Parser`, so
/// the reported phase matches where the mistake actually is.
fn tagged_parse_error(e: ParseError) -> anyhow::Error {
    let tag = if matches!(e, ParseError::Lex(_)) { Tag::Lexer } else { Tag::Parser };
    tagged(tag, e.span(), e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asm_output_path_replaces_the_extension() {
        assert_eq!(asm_output_path(Path::new("main.ts")), Path::new("main.asm"));
        assert_eq!(asm_output_path(Path::new("dir/prog.fax")), Path::new("dir/prog.asm"));
    }
}
