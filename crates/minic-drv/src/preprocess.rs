//! Strips `// ...` line comments before the lexer ever sees the source
//! text.
//!
//! A naive "cut from `//` to the next newline" pass would also eat a `//`
//! that appears inside a string literal, so this tracks "currently inside
//! an open double-quoted string" state while it scans — honoring `\"` so a
//! backslash-escaped quote doesn't prematurely close the string — and only
//! treats `//` as a comment start outside of that state. Every newline is
//! preserved regardless of where it falls, so the byte offsets the lexer
//! reports still line up with the original file for `--verbose`'s located
//! diagnostics.

/// Returns `source` with every line comment removed, newlines intact.
pub fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut in_string = false;
    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
                continue;
            }
            if c == '"' {
                in_string = false;
            }
            continue;
        }
        if c == '"' {
            in_string = true;
            out.push(c);
            continue;
        }
        if c == '/' && chars.peek() == Some(&'/') {
            for c in chars.by_ref() {
                if c == '\n' {
                    out.push('\n');
                    break;
                }
            }
            continue;
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_a_trailing_line_comment() {
        assert_eq!(strip_comments("let x:number = 1; // comment\n"), "let x:number = 1; \n");
    }

    #[test]
    fn preserves_newlines_so_offsets_still_line_up() {
        let out = strip_comments("// first\nlog(1);\n// second\nlog(2);\n");
        assert_eq!(out, "\nlog(1);\n\nlog(2);\n");
    }

    #[test]
    fn does_not_strip_a_double_slash_inside_a_string_literal() {
        let out = strip_comments("log(\"http://example.com\");\n");
        assert_eq!(out, "log(\"http://example.com\");\n");
    }

    #[test]
    fn an_escaped_quote_does_not_end_the_string_early() {
        let out = strip_comments("log(\"a\\\"// not a comment\");\n");
        assert_eq!(out, "log(\"a\\\"// not a comment\");\n");
    }

    #[test]
    fn a_comment_after_a_closed_string_is_still_stripped() {
        let out = strip_comments("log(\"ok\"); // trailing\n");
        assert_eq!(out, "log(\"ok\"); \n");
    }
}
