//! # Applesoft decompiler
//!
//! Turns a tokenized Applesoft program image into an annotated listing.
//!
//! The image is a sequence of line records.  Each record holds a 2 byte link to the
//! next record, a 2 byte line number, the statement bytes, and a terminating zero.
//! Bytes with the high bit set are keyword tokens.
//!
//! The `tokenizer` splits each line into `Fragment`s, roughly one per statement,
//! and fills in the `Symbols` tables on the way.  The `listing` module renders the
//! fragments, using `indent` to track loop and conditional nesting.

mod token_maps;
#[cfg(test)]
mod tokenize_test;
pub mod diagnostics;
pub mod settings;
pub mod symbols;
pub mod tokenizer;
pub mod indent;
pub mod wrap;
pub mod listing;
pub mod dump;

use settings::Settings;
use symbols::Symbols;
use diagnostics::Diagnostic;

pub use token_maps::detok;

pub const TOK_FOR: u8 = 0x81;
pub const TOK_NEXT: u8 = 0x82;
pub const TOK_DATA: u8 = 0x83;
pub const TOK_INPUT: u8 = 0x84;
pub const TOK_DIM: u8 = 0x86;
pub const TOK_LET: u8 = 0xaa;
pub const TOK_GOTO: u8 = 0xab;
pub const TOK_IF: u8 = 0xad;
pub const TOK_GOSUB: u8 = 0xb0;
pub const TOK_RETURN: u8 = 0xb1;
pub const TOK_REM: u8 = 0xb2;
pub const TOK_ON: u8 = 0xb4;
pub const TOK_PRINT: u8 = 0xba;
pub const TOK_THEN: u8 = 0xc4;
pub const TOK_EQUALS: u8 = 0xd0;

pub const QUOTE: u8 = 0x22;
pub const COLON: u8 = 0x3a;
pub const COMMA: u8 = 0x2c;
pub const LEFT_PAREN: u8 = 0x28;
pub const DOLLAR: u8 = 0x24;
pub const PERCENT: u8 = 0x25;
pub const BACKSPACE: u8 = 0x08;
pub const CARRIAGE_RETURN: u8 = 0x0d;

#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum JumpKind {
    Goto,
    Gosub
}

#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum FragmentKind {
    /// nothing but a separator
    Empty,
    /// LET or a bare assignment
    Let,
    For,
    Next,
    /// the condition of an IF, including THEN if present
    If,
    Goto,
    Gosub,
    On,
    Rem,
    Data,
    Dim,
    Print,
    Input,
    Return,
    /// a bare line number, as in `IF X THEN 100`
    ImpliedGoto,
    Other
}

/// A statement sized piece of a line.
#[derive(Clone,Debug)]
pub struct Fragment {
    /// offset of the first byte in the program image
    pub start: usize,
    /// offset just past the last byte, including any statement separator
    pub end: usize,
    /// the statement bytes, without the separator
    pub body: Vec<u8>,
    pub kind: FragmentKind,
    /// this is the first fragment of its line
    pub first: bool,
    /// position of `=` in the rendered text of an assignment, 0 if none
    pub assign_pos: usize,
    pub for_variable: String,
    /// empty for a naked NEXT
    pub next_variables: Vec<String>,
    pub on_expression: String,
    pub on_jump: Option<JumpKind>
}

/// One stored program line.
#[derive(Clone,Debug)]
pub struct Line {
    pub number: u16,
    /// offset of the link bytes in the program image
    pub start: usize,
    /// offset just past the terminating zero
    pub end: usize,
    pub fragments: Vec<Fragment>
}

/// Everything learned from one pass over a program image.
#[derive(Clone,Debug)]
pub struct Program {
    img: Vec<u8>,
    end_ptr: usize,
    pub lines: Vec<Line>,
    pub symbols: Symbols,
    pub diagnostics: Vec<Diagnostic>
}

fn is_control(b: u8) -> bool {
    b < 0x20
}

/// Render statement bytes as text.  A token is separated from whatever precedes it
/// by a space.  Control characters are dropped unless `show_caret` is set.
pub fn render_bytes(bytes: &[u8], config: &Settings) -> String {
    let mut ans = String::new();
    for b in bytes {
        if *b > 127 {
            if ans.len() > 0 && !ans.ends_with(' ') {
                ans.push(' ');
            }
            match detok(*b) {
                Some(_) if *b==TOK_THEN && !config.show_then => {},
                Some(txt) => ans += txt,
                None => ans += &format!("\\x{:02x}",b)
            }
        } else if is_control(*b) {
            if config.show_caret {
                ans.push('^');
                ans.push((*b + 64) as char);
            }
        } else {
            ans.push(*b as char);
        }
    }
    ans
}

impl Fragment {
    pub fn is(&self, kind: FragmentKind) -> bool {
        self.kind == kind
    }
    /// The body contains the token somewhere after the leading byte
    pub fn has(&self, tok: u8) -> bool {
        self.body.iter().skip(1).any(|b| *b==tok)
    }
    /// Bytes with the high bit set after the leading byte, for a REM this means hidden machine code
    pub fn contains_token(&self) -> bool {
        self.body.iter().skip(1).any(|b| *b > 127)
    }
    pub fn contains_control_chars(&self) -> bool {
        self.body.iter().skip(1).any(|b| is_control(*b))
    }
    /// Kind of jump this fragment makes, if any
    pub fn jump(&self) -> Option<JumpKind> {
        match self.kind {
            FragmentKind::Gosub => Some(JumpKind::Gosub),
            FragmentKind::Goto | FragmentKind::ImpliedGoto => Some(JumpKind::Goto),
            FragmentKind::On => self.on_jump,
            _ => None
        }
    }
    /// Rendered text of this fragment
    pub fn to_text(&self, config: &Settings) -> String {
        let mut ans = String::new();
        if self.kind == FragmentKind::ImpliedGoto && !config.show_then {
            ans += "GOTO ";
        }
        ans += &render_bytes(&self.body,config);
        match self.kind {
            FragmentKind::Rem | FragmentKind::Data => ans,
            _ => ans.trim_end().to_string()
        }
    }
}

/// Find the load address using the first line's link and length.
/// Returns None if the image is too short to hold a link.
pub fn deduce_address(img: &[u8]) -> Option<u16> {
    if img.len() < 2 {
        return None;
    }
    let line2_addr = u16::from_le_bytes([img[0],img[1]]);
    if line2_addr == 0 {
        return Some(0);
    }
    let mut line1_len = 5;
    let mut ptr = 4;
    while ptr < img.len() && img[ptr] != 0 {
        line1_len += 1;
        ptr += 1;
    }
    Some(line2_addr.wrapping_sub(line1_len))
}

impl Line {
    /// Fragment `idx` is a REM that follows a statement on this line.
    /// Bare separators before it do not count.
    pub fn is_joinable_rem(&self, idx: usize) -> bool {
        self.fragments[idx].is(FragmentKind::Rem)
            && self.fragments[..idx].iter().any(|f| !f.is(FragmentKind::Empty))
    }
}

impl Program {
    pub(crate) fn new(img: &[u8], end_ptr: usize, lines: Vec<Line>, symbols: Symbols, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            img: img.to_vec(),
            end_ptr,
            lines,
            symbols,
            diagnostics
        }
    }
    pub fn img(&self) -> &[u8] {
        &self.img
    }
    /// Offset of the record that ended the program, usually a zero link
    pub fn end_of_program(&self) -> usize {
        self.end_ptr
    }
    pub fn load_address(&self) -> usize {
        deduce_address(&self.img).unwrap_or(0) as usize
    }
    /// Offset of bytes that follow the end-of-program link, if there are at least 2 of them
    pub fn extra_data(&self) -> Option<usize> {
        let ptr = self.end_ptr + 2;
        match ptr + 1 < self.img.len() {
            true => Some(ptr),
            false => None
        }
    }
}
