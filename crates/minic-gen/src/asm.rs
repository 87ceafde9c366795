//! The ordered buffer of emitted assembly lines, and the fixed x86-32 NASM
//! prologue/epilogue it is dumped inside of.
//!
//! A single generation pass appends to one [`CodeBuffer`] and flushes it
//! exactly once. There is no cross-pass state: a fresh [`CodeBuffer`] is
//! created for every call to [`crate::generate`].

/// An ordered sequence of already-formatted NASM source lines.
#[derive(Debug, Default)]
pub struct CodeBuffer {
    lines: Vec<String>,
}

impl CodeBuffer {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Appends one already-formatted line (an instruction, a label, or a
    /// comment-only line). Callers are responsible for their own leading
    /// indentation — labels are flush left, instructions are indented two
    /// spaces, matching the rest of this file's prologue/epilogue text.
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    #[cfg(test)]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Renders the whole `.asm` file: fixed data/text prologue, every line
    /// emitted during the pass, then the fixed epilogue issuing a Linux
    /// `int 0x80` exit (with the Windows alternative left as a comment).
    pub fn dump(&self) -> String {
        let mut out = String::new();
        out.push_str(PROLOGUE);
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(EPILOGUE);
        out
    }
}

const PROLOGUE: &str = "\
section .data
  format_out: db \"%d\", 10, 0 ; printf format
  format_in:  db \"%d\", 0    ; scanf format
  scan_int:   dd 0            ; 32-bit scratch integer

section .text

  extern printf ; use _printf on Windows
  extern scanf  ; use _scanf  on Windows
  ; extern _ExitProcess@4 ; Windows
  global _start

_start:
  push ebp       ; save caller's EBP
  mov  ebp, esp  ; fresh frame

  ; generated code begins here

";

const EPILOGUE: &str = "\
  ; generated code ends here

  mov esp, ebp   ; restore the stack
  pop ebp

  ; Linux exit syscall
  mov eax, 1
  xor ebx, ebx
  int 0x80
  ; Windows:
  ; push dword 0
  ; call _ExitProcess@4
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dump_wraps_emitted_lines_in_prologue_and_epilogue() {
        let mut buf = CodeBuffer::new();
        buf.push("  mov eax, 1");
        let out = buf.dump();
        assert!(out.starts_with("section .data"));
        assert!(out.contains("  mov eax, 1\n"));
        assert!(out.trim_end().ends_with("call _ExitProcess@4"));
    }

    #[test]
    fn empty_buffer_still_produces_a_well_formed_file() {
        let out = CodeBuffer::new().dump();
        assert!(out.contains("extern printf"));
        assert!(out.contains("int 0x80"));
    }
}
