//! The tokenizer.
//!
//! `Lexer` produces tokens on demand: there is no materialized token stream.
//! `advance` skips whitespace, classifies the next lexeme by greedy
//! longest-match, and stores it; `current` exposes what was stored
//! without consuming it. Calling `advance` past `EOF` just returns `EOF`
//! again forever, which lets the parser's lookahead loops stay simple.

use minic_util::{Interner, Span};

use crate::cursor::Cursor;
use crate::error::LexError;
use crate::token::{Token, TokenKind, TokenValue, TypeName};

const RESERVED: &[(&str, TokenKind)] = &[
    ("let", TokenKind::Var),
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("while", TokenKind::While),
    ("function", TokenKind::Func),
    ("return", TokenKind::Return),
    ("log", TokenKind::Print),
    ("readline", TokenKind::Read),
];

pub struct Lexer<'a> {
    source: &'a str,
    cursor: Cursor<'a>,
    interner: &'a Interner,
    next: Option<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, interner: &'a Interner) -> Self {
        Self {
            source,
            cursor: Cursor::new(source),
            interner,
            next: None,
        }
    }

    /// The pending token, or `None` before the first call to `advance`.
    pub fn current(&self) -> Option<&Token> {
        self.next.as_ref()
    }

    /// Scan and store the next token. Once `EOF` has been reached, every
    /// further call leaves `current()` at `EOF`.
    pub fn advance(&mut self) -> Result<(), LexError> {
        self.skip_whitespace();
        let tok = self.scan_one()?;
        self.next = Some(tok);
        Ok(())
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.cursor.peek() {
            if c.is_whitespace() {
                self.cursor.bump();
            } else {
                break;
            }
        }
    }

    fn scan_one(&mut self) -> Result<Token, LexError> {
        let start = self.cursor.pos();
        let Some(c) = self.cursor.peek() else {
            return Ok(Token::eof(start));
        };

        if c == '"' {
            return self.scan_string(start);
        }

        if let Some(tok) = self.scan_three_char_op(start) {
            return Ok(tok);
        }
        if let Some(tok) = self.scan_two_char_op(start) {
            return Ok(tok);
        }
        if let Some(tok) = self.scan_one_char(c, start) {
            self.cursor.bump();
            return Ok(tok);
        }
        if c.is_ascii_digit() {
            return self.scan_int(start);
        }
        if c.is_alphabetic() {
            return self.scan_word(start);
        }
        if c == '_' {
            self.cursor.bump();
            return Err(LexError::LeadingUnderscore {
                span: Span::new(start, self.cursor.pos()),
            });
        }

        self.cursor.bump();
        Err(LexError::InvalidSymbol {
            ch: c,
            span: Span::new(start, self.cursor.pos()),
        })
    }

    fn scan_three_char_op(&mut self, start: usize) -> Option<Token> {
        let (a, b, c) = (
            self.cursor.peek()?,
            self.cursor.peek_at(1),
            self.cursor.peek_at(2),
        );
        let kind = match (a, b, c) {
            ('=', Some('='), Some('=')) => TokenKind::EqualStrict,
            ('!', Some('='), Some('=')) => TokenKind::NeqStrict,
            _ => return None,
        };
        self.cursor.bump();
        self.cursor.bump();
        self.cursor.bump();
        Some(Token::new(kind, TokenValue::None, Span::new(start, self.cursor.pos())))
    }

    fn scan_two_char_op(&mut self, start: usize) -> Option<Token> {
        let (a, b) = (self.cursor.peek()?, self.cursor.peek_at(1));
        let kind = match (a, b) {
            ('&', Some('&')) => TokenKind::And,
            ('|', Some('|')) => TokenKind::Or,
            ('=', Some('=')) => TokenKind::Equal,
            ('!', Some('=')) => TokenKind::Neq,
            ('<', Some('=')) => TokenKind::Le,
            ('>', Some('=')) => TokenKind::Ge,
            _ => return None,
        };
        self.cursor.bump();
        self.cursor.bump();
        Some(Token::new(kind, TokenValue::None, Span::new(start, self.cursor.pos())))
    }

    fn scan_one_char(&self, c: char, start: usize) -> Option<Token> {
        let kind = match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Mult,
            '/' => TokenKind::Div,
            '%' => TokenKind::Mod,
            '(' => TokenKind::OpenPar,
            ')' => TokenKind::ClosePar,
            '{' => TokenKind::OpenBra,
            '}' => TokenKind::CloseBra,
            ';' => TokenKind::End,
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,
            '=' => TokenKind::Assign,
            '!' => TokenKind::Not,
            '<' => TokenKind::Lt,
            '>' => TokenKind::Gt,
            _ => return None,
        };
        // The span end is filled in by the caller once it bumps the cursor.
        Some(Token::new(kind, TokenValue::None, Span::new(start, start + c.len_utf8())))
    }

    fn scan_string(&mut self, start: usize) -> Result<Token, LexError> {
        self.cursor.bump(); // opening quote
        let mut s = String::new();
        loop {
            match self.cursor.peek() {
                None => {
                    return Err(LexError::UnterminatedString {
                        span: Span::new(start, self.cursor.pos()),
                    })
                }
                Some('"') => {
                    self.cursor.bump();
                    break;
                }
                Some('\\') => {
                    let esc_start = self.cursor.pos();
                    self.cursor.bump();
                    match self.cursor.peek() {
                        None => {
                            return Err(LexError::UnterminatedEscape {
                                span: Span::new(esc_start, self.cursor.pos()),
                            })
                        }
                        Some(e @ ('"' | '\\' | 'n' | 't' | 'r')) => {
                            s.push(match e {
                                '"' => '"',
                                '\\' => '\\',
                                'n' => '\n',
                                't' => '\t',
                                'r' => '\r',
                                _ => unreachable!(),
                            });
                            self.cursor.bump();
                        }
                        Some(other) => {
                            return Err(LexError::InvalidEscape {
                                ch: other,
                                span: Span::new(esc_start, self.cursor.pos() + other.len_utf8()),
                            })
                        }
                    }
                }
                Some(c) => {
                    s.push(c);
                    self.cursor.bump();
                }
            }
        }
        Ok(Token::new(TokenKind::Str, TokenValue::Str(s), Span::new(start, self.cursor.pos())))
    }

    fn scan_int(&mut self, start: usize) -> Result<Token, LexError> {
        while matches!(self.cursor.peek(), Some(c) if c.is_ascii_digit()) {
            self.cursor.bump();
        }
        let end = self.cursor.pos();
        let text = self.cursor_source_slice(start, end);
        match text.parse::<i32>() {
            Ok(n) => Ok(Token::new(TokenKind::Int, TokenValue::Int(n), Span::new(start, end))),
            Err(_) => Err(LexError::IntOverflow {
                text: text.to_string(),
                span: Span::new(start, end),
            }),
        }
    }

    fn scan_word(&mut self, start: usize) -> Result<Token, LexError> {
        self.cursor.bump();
        while matches!(self.cursor.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            self.cursor.bump();
        }
        let end = self.cursor.pos();
        let text = self.cursor_source_slice(start, end);
        let span = Span::new(start, end);

        if text == "true" {
            return Ok(Token::new(TokenKind::Bool, TokenValue::Bool(true), span));
        }
        if text == "false" {
            return Ok(Token::new(TokenKind::Bool, TokenValue::Bool(false), span));
        }
        if let Some(ty) = TypeName::from_keyword(text) {
            return Ok(Token::new(TokenKind::Type, TokenValue::Type(ty), span));
        }
        if let Some(&(_, kind)) = RESERVED.iter().find(|(kw, _)| *kw == text) {
            return Ok(Token::new(kind, TokenValue::None, span));
        }
        let sym = self.interner.intern(text);
        Ok(Token::new(TokenKind::Iden, TokenValue::Ident(sym), span))
    }

    /// Re-slices the original source by byte offset. Only ever called with
    /// offsets this lexer itself has already walked past, so the slice is
    /// always on a char boundary.
    fn cursor_source_slice(&self, start: usize, end: usize) -> &'a str {
        &self.source[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        let interner = Interner::new();
        let mut lex = Lexer::new(src, &interner);
        let mut out = Vec::new();
        loop {
            lex.advance().expect("lex error in test input");
            let tok = lex.current().unwrap().clone();
            let done = tok.kind == TokenKind::Eof;
            out.push(tok.kind);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn greedy_match_prefers_three_char_over_shorter() {
        assert_eq!(kinds("==="), vec![TokenKind::EqualStrict, TokenKind::Eof]);
        assert_eq!(kinds("!=="), vec![TokenKind::NeqStrict, TokenKind::Eof]);
        assert_eq!(kinds("=="), vec![TokenKind::Equal, TokenKind::Eof]);
        assert_eq!(kinds("="), vec![TokenKind::Assign, TokenKind::Eof]);
    }

    #[test]
    fn keywords_and_type_names_are_not_identifiers() {
        assert_eq!(
            kinds("let if else while function return log readline"),
            vec![
                TokenKind::Var,
                TokenKind::If,
                TokenKind::Else,
                TokenKind::While,
                TokenKind::Func,
                TokenKind::Return,
                TokenKind::Print,
                TokenKind::Read,
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            kinds("number boolean string void"),
            vec![TokenKind::Type, TokenKind::Type, TokenKind::Type, TokenKind::Type, TokenKind::Eof]
        );
    }

    #[test]
    fn boolean_literals_carry_their_value() {
        let interner = Interner::new();
        let mut lex = Lexer::new("true false", &interner);
        lex.advance().unwrap();
        assert_eq!(lex.current().unwrap().value, TokenValue::Bool(true));
        lex.advance().unwrap();
        assert_eq!(lex.current().unwrap().value, TokenValue::Bool(false));
    }

    #[test]
    fn string_literal_resolves_escapes() {
        let interner = Interner::new();
        let mut lex = Lexer::new(r#""a\nb\tc\\d\"e""#, &interner);
        lex.advance().unwrap();
        let tok = lex.current().unwrap();
        assert_eq!(tok.value, TokenValue::Str("a\nb\tc\\d\"e".to_string()));
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let interner = Interner::new();
        let mut lex = Lexer::new("\"abc", &interner);
        assert!(matches!(lex.advance(), Err(LexError::UnterminatedString { .. })));
    }

    #[test]
    fn identifier_interns_to_a_stable_symbol() {
        let interner = Interner::new();
        let mut lex = Lexer::new("count count", &interner);
        lex.advance().unwrap();
        let TokenValue::Ident(a) = lex.current().unwrap().value else {
            panic!("expected identifier");
        };
        lex.advance().unwrap();
        let TokenValue::Ident(b) = lex.current().unwrap().value else {
            panic!("expected identifier");
        };
        assert_eq!(a, b);
    }

    #[test]
    fn leading_underscore_identifier_is_rejected() {
        let interner = Interner::new();
        let mut lex = Lexer::new("_private", &interner);
        assert!(matches!(lex.advance(), Err(LexError::LeadingUnderscore { .. })));
    }

    #[test]
    fn integer_literal_out_of_i32_range_is_an_error() {
        let interner = Interner::new();
        let mut lex = Lexer::new("99999999999", &interner);
        assert!(matches!(lex.advance(), Err(LexError::IntOverflow { .. })));
    }

    #[test]
    fn invalid_symbol_reports_offending_character() {
        let interner = Interner::new();
        let mut lex = Lexer::new("@", &interner);
        assert!(matches!(lex.advance(), Err(LexError::InvalidSymbol { ch: '@', .. })));
    }

    #[test]
    fn advancing_past_eof_stays_at_eof() {
        let interner = Interner::new();
        let mut lex = Lexer::new("", &interner);
        lex.advance().unwrap();
        assert_eq!(lex.current().unwrap().kind, TokenKind::Eof);
        lex.advance().unwrap();
        assert_eq!(lex.current().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn whitespace_between_tokens_is_skipped() {
        assert_eq!(
            kinds("  1\t+\n2  "),
            vec![TokenKind::Int, TokenKind::Plus, TokenKind::Int, TokenKind::Eof]
        );
    }
}
