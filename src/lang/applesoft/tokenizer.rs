//! Module containing the Applesoft tokenizer
//!
//! Here "tokenizing" runs in the direction of the listing: a tokenized program image
//! is split into lines and fragments, and the symbol tables are built along the way.
//! The scan never fails; anything unexpected is recorded as a diagnostic.

use log::trace;
use super::*;
use super::settings::Settings;
use super::symbols::Symbols;
use super::diagnostics::{self,Anomaly,Diagnostic};

/// State of the scan within one line
struct ScanState {
    in_string: bool,
    /// once set it stays set until the end of the line
    in_remark: bool,
    /// an IF has been seen and neither THEN nor GOTO has followed
    awaiting_then: bool,
    string_start: usize,
    frag_start: usize
}

impl ScanState {
    fn new(start: usize) -> Self {
        Self {
            in_string: false,
            in_remark: false,
            awaiting_then: false,
            string_start: start,
            frag_start: start
        }
    }
}

/// Handles decoding of tokenized Applesoft BASIC
pub struct Tokenizer {
    symbols: Symbols,
    diagnostics: Vec<Diagnostic>,
    /// positions recorded in fragments are measured against the default rendering
    canonical: Settings,
    curr_line: u16
}

fn parse_line_number(bytes: &[u8]) -> Option<u16> {
    let digits: String = bytes.iter()
        .skip_while(|b| **b==b' ')
        .take_while(|b| b.is_ascii_digit())
        .map(|b| *b as char)
        .collect();
    u16::from_str_radix(&digits,10).ok()
}

fn is_variable_byte(b: u8) -> bool {
    b.is_ascii_uppercase() || b.is_ascii_digit() || b==DOLLAR || b==PERCENT
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            symbols: Symbols::new(),
            diagnostics: Vec::new(),
            canonical: Settings::new(),
            curr_line: 0
        }
    }
    fn anomaly(&mut self, anomaly: Anomaly) {
        diagnostics::push(&mut self.diagnostics,self.curr_line,anomaly);
    }
    /// Decode the program image.  Stops at the first link that does not increase,
    /// or when too few bytes remain to hold a line record.
    pub fn detokenize(&mut self, img: &[u8]) -> Program {
        self.symbols = Symbols::new();
        self.diagnostics = Vec::new();
        let mut lines = Vec::new();
        let mut ptr = 0;
        let mut prev_link = 0;
        while ptr + 6 <= img.len() {
            let link = u16::from_le_bytes([img[ptr],img[ptr+1]]);
            if link <= prev_link {
                break;
            }
            let line = self.scan_line(img,ptr);
            trace!("line {} has {} fragments",line.number,line.fragments.len());
            ptr = line.end;
            prev_link = link;
            lines.push(line);
        }
        let symbols = std::mem::take(&mut self.symbols);
        let diagnostics = std::mem::take(&mut self.diagnostics);
        Program::new(img,ptr,lines,symbols,diagnostics)
    }
    /// Scan the line record at `ptr`, which must have at least 4 bytes
    fn scan_line(&mut self, img: &[u8], ptr: usize) -> Line {
        let number = u16::from_le_bytes([img[ptr+2],img[ptr+3]]);
        self.curr_line = number;
        let mut state = ScanState::new(ptr + 4);
        let mut fragments: Vec<Fragment> = Vec::new();
        let mut p = ptr + 4;
        let mut terminated = false;
        while p < img.len() {
            let b = img[p];
            if b == 0 {
                terminated = true;
                break;
            }
            p += 1;
            if state.in_remark {
                continue;
            }
            if state.in_string {
                if b == QUOTE {
                    state.in_string = false;
                    let literal = String::from_utf8_lossy(&img[state.string_start..p]).to_string();
                    self.symbols.add_string(number,&literal);
                }
                continue;
            }
            match b {
                TOK_IF => state.awaiting_then = true,
                TOK_THEN if state.awaiting_then => {
                    state.awaiting_then = false;
                    self.close(img,&mut fragments,state.frag_start,p,p);
                    state.frag_start = p;
                },
                TOK_GOTO if state.awaiting_then => {
                    state.awaiting_then = false;
                    self.close(img,&mut fragments,state.frag_start,p-1,p-1);
                    state.frag_start = p - 1;
                },
                COLON => {
                    if state.awaiting_then {
                        self.anomaly(Anomaly::IfWithoutThen);
                        state.awaiting_then = false;
                    }
                    self.close(img,&mut fragments,state.frag_start,p,p-1);
                    state.frag_start = p;
                },
                TOK_REM => {
                    if p - 1 != state.frag_start {
                        self.anomaly(Anomaly::MidLineRem);
                        self.close(img,&mut fragments,state.frag_start,p-1,p-1);
                        state.frag_start = p - 1;
                    }
                    state.in_remark = true;
                },
                QUOTE => {
                    state.in_string = true;
                    state.string_start = p - 1;
                },
                _ => {}
            }
        }
        if state.in_string {
            let literal = String::from_utf8_lossy(&img[state.string_start..p]).to_string();
            self.symbols.add_string(number,&literal);
        }
        if state.awaiting_then {
            self.anomaly(Anomaly::IfWithoutThen);
        }
        self.close(img,&mut fragments,state.frag_start,p,p);
        if !terminated {
            self.anomaly(Anomaly::UnterminatedLine);
        }
        Line {
            number,
            start: ptr,
            end: match terminated { true => p + 1, false => p },
            fragments
        }
    }
    /// Add the fragment spanning `[start,end)` whose statement bytes end at `body_end`.
    /// Zero length spans are not added.
    fn close(&mut self, img: &[u8], fragments: &mut Vec<Fragment>, start: usize, end: usize, body_end: usize) {
        if end <= start {
            return;
        }
        let frag = self.build_fragment(&img[start..body_end],start,end,fragments.len()==0);
        fragments.push(frag);
    }
    fn build_fragment(&mut self, body: &[u8], start: usize, end: usize, first: bool) -> Fragment {
        let mut frag = Fragment {
            start,
            end,
            body: body.to_vec(),
            kind: FragmentKind::Other,
            first,
            assign_pos: 0,
            for_variable: String::new(),
            next_variables: Vec::new(),
            on_expression: String::new(),
            on_jump: None
        };
        match body.first() {
            None => frag.kind = FragmentKind::Empty,
            Some(b) if *b > 127 => self.classify_token(&mut frag),
            Some(b) if b.is_ascii_digit() => {
                frag.kind = FragmentKind::ImpliedGoto;
                match parse_line_number(body) {
                    Some(target) => self.symbols.add_goto(target,self.curr_line),
                    None => self.anomaly(Anomaly::MissingTarget("implied GOTO".to_string()))
                }
            },
            Some(_) => {
                if body.contains(&TOK_EQUALS) {
                    frag.kind = FragmentKind::Let;
                    self.record_equals(&mut frag);
                }
            }
        }
        if !frag.is(FragmentKind::Rem) && !frag.is(FragmentKind::Data) {
            self.scan_variables(body);
        }
        frag
    }
    fn record_equals(&self, frag: &mut Fragment) {
        if frag.has(TOK_EQUALS) {
            frag.assign_pos = frag.to_text(&self.canonical).find('=').unwrap_or(0);
        }
    }
    fn classify_token(&mut self, frag: &mut Fragment) {
        let args = frag.body[1..].to_vec();
        frag.kind = match frag.body[0] {
            TOK_FOR => {
                frag.for_variable = args.iter()
                    .take_while(|b| **b != TOK_EQUALS)
                    .map(|b| *b as char)
                    .collect::<String>()
                    .trim()
                    .to_string();
                FragmentKind::For
            },
            TOK_NEXT => {
                frag.next_variables = String::from_utf8_lossy(&args)
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| s.len() > 0)
                    .collect();
                FragmentKind::Next
            },
            TOK_LET => {
                self.record_equals(frag);
                FragmentKind::Let
            },
            TOK_GOTO | TOK_GOSUB => {
                let (kind,name) = match frag.body[0] {
                    TOK_GOTO => (FragmentKind::Goto,"GOTO"),
                    _ => (FragmentKind::Gosub,"GOSUB")
                };
                match (parse_line_number(&args),kind) {
                    (Some(target),FragmentKind::Goto) => self.symbols.add_goto(target,self.curr_line),
                    (Some(target),_) => self.symbols.add_gosub(target,self.curr_line),
                    (None,_) => self.anomaly(Anomaly::MissingTarget(name.to_string()))
                }
                kind
            },
            TOK_ON => {
                self.scan_on(frag);
                FragmentKind::On
            },
            TOK_IF => FragmentKind::If,
            TOK_REM => FragmentKind::Rem,
            TOK_DATA => FragmentKind::Data,
            TOK_DIM => FragmentKind::Dim,
            TOK_PRINT => FragmentKind::Print,
            TOK_INPUT => FragmentKind::Input,
            TOK_RETURN => FragmentKind::Return,
            _ => FragmentKind::Other
        };
    }
    /// Find the expression and the target list of `ON expr GOTO|GOSUB n1,n2,...`
    fn scan_on(&mut self, frag: &mut Fragment) {
        let args = frag.body[1..].to_vec();
        let split = args.iter().position(|b| *b==TOK_GOTO || *b==TOK_GOSUB);
        let expr_end = split.unwrap_or(args.len());
        frag.on_expression = render_bytes(&args[0..expr_end],&self.canonical).trim().to_string();
        let idx = match split {
            Some(i) => i,
            None => {
                self.anomaly(Anomaly::OnWithoutTarget);
                return;
            }
        };
        let jump = match args[idx] {
            TOK_GOSUB => JumpKind::Gosub,
            _ => JumpKind::Goto
        };
        frag.on_jump = Some(jump);
        let list = String::from_utf8_lossy(&args[idx+1..]).to_string();
        for chunk in list.split(',') {
            match u16::from_str_radix(chunk.trim(),10) {
                Ok(target) => match jump {
                    JumpKind::Goto => self.symbols.add_goto(target,self.curr_line),
                    JumpKind::Gosub => self.symbols.add_gosub(target,self.curr_line)
                },
                Err(_) => self.anomaly(Anomaly::BadOnTarget(chunk.to_string()))
            }
        }
    }
    /// Record every variable reference outside of string literals
    fn scan_variables(&mut self, body: &[u8]) {
        let mut var = String::new();
        let mut in_quote = false;
        for b in body.iter().chain(std::iter::once(&0)) {
            if in_quote && *b != QUOTE {
                continue;
            }
            if is_variable_byte(*b) {
                var.push(*b as char);
                continue;
            }
            if var.len() > 0 {
                if *b == LEFT_PAREN {
                    var.push('(');
                }
                if var.as_bytes()[0].is_ascii_uppercase() {
                    self.symbols.add_variable(&var,self.curr_line);
                }
                var.clear();
            }
            if *b == QUOTE {
                in_quote = !in_quote;
            }
        }
    }
}
