//! Module to render a decoded Applesoft program as a listing
//!
//! The listing is built one fragment at a time.  Each fragment is indented according
//! to the loop and conditional nesting, optionally aligned on its `=`, and optionally
//! wrapped.  Optional sections follow the program: extra data, cross references,
//! variables, and strings.
//!
//! Rendering never fails.  When a wrapping strategy does not apply the fragment is
//! shown unwrapped, and a diagnostic is added to the result.

use log::debug;
use crate::lang::Disassemble;
use crate::lang::merlin::disassembly::Disassembler;
use super::{Program,Line,Fragment,FragmentKind,JumpKind,BACKSPACE,CARRIAGE_RETURN};
use super::settings::Settings;
use super::symbols::Symbols;
use super::indent::IndentTracker;
use super::diagnostics::{self,Anomaly,Diagnostic};
use super::wrap;

const INDENT_SIZE: usize = 2;

/// The rendered text along with every anomaly found while decoding and rendering
#[derive(Debug,Clone)]
pub struct Listing {
    pub text: String,
    pub diagnostics: Vec<Diagnostic>
}

pub struct Lister {
    config: Settings,
    disassembler: Box<dyn Disassemble>,
    diagnostics: Vec<Diagnostic>,
    curr_line: u16
}

/// Length of the last line of `txt`
fn current_line_len(txt: &str) -> usize {
    match txt.rfind('\n') {
        Some(i) => txt[i+1..].chars().count(),
        None => txt.chars().count()
    }
}

fn pad_to(txt: &mut String, col: usize) {
    while txt.chars().count() < col {
        txt.push(' ');
    }
}

/// Make sure a blank line precedes whatever is added next
fn blank_line(txt: &mut String) {
    if txt.len() == 0 || txt.ends_with("\n\n") {
        return;
    }
    if !txt.ends_with('\n') {
        txt.push('\n');
    }
    txt.push('\n');
}

fn bracketed<T: ToString>(items: &[T]) -> String {
    let v: Vec<String> = items.iter().map(|x| x.to_string()).collect();
    ["[",&v.join(", "),"]"].concat()
}

impl Lister {
    pub fn new() -> Self {
        Self {
            config: Settings::new(),
            disassembler: Box::new(Disassembler::new()),
            diagnostics: Vec::new(),
            curr_line: 0
        }
    }
    pub fn set_config(&mut self, config: Settings) {
        self.config = config;
    }
    /// Replace the disassembler used for machine code hidden in REM statements
    pub fn set_disassembler(&mut self, disassembler: Box<dyn Disassemble>) {
        self.disassembler = disassembler;
    }
    fn anomaly(&mut self, anomaly: Anomaly) {
        diagnostics::push(&mut self.diagnostics,self.curr_line,anomaly);
    }
    /// Render the program.  The `name` is only used in the header.
    pub fn list(&mut self, program: &Program, name: &str) -> Listing {
        self.diagnostics = Vec::new();
        let mut full = String::new();
        if self.config.show_header {
            full += &header(program,name);
        }
        let mut tracker = IndentTracker::new();
        let mut align_pos = 0;
        for (line_idx,line) in program.lines.iter().enumerate() {
            self.curr_line = line.number;
            tracker.start_line();
            align_pos = self.list_line(program,line_idx,&mut tracker,align_pos,&mut full);
            // indentation changes after an IF, so do not carry alignment forward
            if tracker.in_if() {
                align_pos = 0;
            }
        }
        if let Some(ptr) = program.extra_data() {
            let img = program.img();
            full += "\nExtra data:\n\n";
            full += &crate::hex_dump(img,ptr,img.len()-ptr,program.load_address()+ptr);
            full += "\n";
        }
        self.trailers(&program.symbols,&mut full);
        while full.ends_with('\n') {
            full.pop();
        }
        let mut all = program.diagnostics.clone();
        all.append(&mut self.diagnostics);
        Listing {
            text: full,
            diagnostics: all
        }
    }
    /// Render one line, returns the alignment position in effect at the end of the line
    fn list_line(&mut self, program: &Program, line_idx: usize, tracker: &mut IndentTracker, mut align_pos: usize, full: &mut String) -> usize {
        let line = &program.lines[line_idx];
        let base_offset = match self.config.show_targets {
            true => 12,
            false => 8
        };
        let mut text = self.line_base(line,&program.symbols) + "  ";
        let mut rendered = false;
        let mut blank_after = false;
        for (frag_idx,frag) in line.fragments.iter().enumerate() {
            if frag.is(FragmentKind::Empty) {
                continue;
            }
            rendered = true;
            let indent = tracker.enter(frag);
            let column = indent * INDENT_SIZE + base_offset;
            if frag.is(FragmentKind::Rem) && frag.contains_token() {
                pad_to(&mut text,column);
                self.inline_assembly(program,frag,&text,full);
                text.clear();
                continue;
            }
            if frag.is(FragmentKind::Rem) && frag.contains_control_chars() {
                pad_to(&mut text,column);
                self.formatted_rem(frag,&mut text);
                *full += &text;
                full.push('\n');
                text.clear();
                continue;
            }
            if !self.config.split_rem && line.is_joinable_rem(frag_idx) {
                if full.ends_with('\n') {
                    full.pop();
                }
                full.push(' ');
            } else {
                if self.config.show_targets && !frag.first {
                    match frag.jump() {
                        Some(JumpKind::Gosub) => text += "<<--",
                        Some(JumpKind::Goto) => text += " <--",
                        None => {}
                    }
                }
                if self.config.align_assign {
                    align_pos = self.align_equals(program,line_idx,frag_idx,align_pos);
                }
                pad_to(&mut text,column);
            }
            let pos = match frag.is(FragmentKind::Rem) {
                true => 0,
                false => align_pos
            };
            let mut frag_text = self.aligned_text(frag,pos);
            if frag.is(FragmentKind::Rem) && self.config.delete_extra_rem_space {
                frag_text = frag_text.replacen("REM  ","REM ",1);
            }
            if frag.is(FragmentKind::Data) && self.config.delete_extra_data_space {
                frag_text = frag_text.replacen("DATA  ","DATA ",1);
            }
            let inset = usize::max(text.chars().count(),current_line_len(full));
            let prefix_len = text.chars().count();
            let pieces = self.wrap_fragment(frag,&frag_text);
            match self.wrap_print(frag,&frag_text) {
                Some(print_lines) => {
                    for (i,s) in print_lines.iter().enumerate() {
                        match i {
                            0 => *full += &text,
                            _ => *full += &" ".repeat(prefix_len)
                        }
                        *full += s;
                        full.push('\n');
                    }
                },
                None => {
                    text += &pieces.join(&["\n"," ".repeat(inset).as_str()].concat());
                    *full += &text;
                    full.push('\n');
                }
            }
            text.clear();
            tracker.leave(frag);
            if self.config.blank_after_return && frag.is(FragmentKind::Return) {
                blank_after = true;
            }
        }
        if !rendered {
            *full += text.trim_end();
            full.push('\n');
        }
        if blank_after {
            full.push('\n');
        }
        align_pos
    }
    /// Line number with the optional target gutter
    fn line_base(&self, line: &Line, symbols: &Symbols) -> String {
        let is_target = symbols.is_target(line.number);
        let hide = !is_target && self.config.only_show_target_line_numbers;
        if !self.config.show_targets {
            return match hide {
                true => " ".repeat(6),
                false => format!(" {:5}",line.number)
            };
        }
        let mut c1 = match line.fragments.first().and_then(|f| f.jump()) {
            Some(JumpKind::Gosub) => "<<",
            Some(JumpKind::Goto) => " <",
            None => "  "
        };
        let mut c2 = "  ";
        if symbols.is_goto_target(line.number) {
            c2 = "> ";
        }
        if symbols.is_gosub_target(line.number) {
            c2 = ">>";
        }
        if c1 == "  " && c2 != "  " {
            c1 = "--";
        }
        if c1 != "  " && c2 == "  " {
            c2 = "--";
        }
        let number = match hide {
            true => " ".repeat(5),
            false => format!("{:5}",line.number)
        };
        format!("{}{} {}",c1,c2,number)
    }
    /// Position of `=` in the rendered fragment, 0 if it is not an assignment
    fn equals_pos(&self, frag: &Fragment) -> usize {
        match frag.assign_pos {
            0 => 0,
            _ => frag.to_text(&self.config).find('=').unwrap_or(0)
        }
    }
    fn aligned_text(&self, frag: &Fragment, pos: usize) -> String {
        let mut ans = frag.to_text(&self.config);
        let eq = self.equals_pos(frag);
        if eq > 0 && pos > eq {
            ans.insert_str(eq,&" ".repeat(pos - eq));
        }
        ans
    }
    /// Keep the current alignment, start a new one, or reset it
    fn align_equals(&self, program: &Program, line_idx: usize, frag_idx: usize, curr: usize) -> usize {
        let frag = &program.lines[line_idx].fragments[frag_idx];
        if self.equals_pos(frag) == 0 {
            return 0;
        }
        match curr {
            0 => self.find_highest(program,line_idx,frag_idx),
            _ => curr
        }
    }
    /// Look ahead through the run of assignments that starts with the given fragment.
    /// The run ends at anything other than an assignment or a joined REM.  It also ends
    /// with the line, if an IF came before the start, since the indentation changes.
    fn find_highest(&self, program: &Program, line_idx: usize, frag_idx: usize) -> usize {
        let mut highest = self.equals_pos(&program.lines[line_idx].fragments[frag_idx]);
        let mut started = false;
        for (li,line) in program.lines.iter().enumerate().skip(line_idx) {
            let mut in_if = false;
            for (fi,frag) in line.fragments.iter().enumerate() {
                if started {
                    if frag.is(FragmentKind::Empty) {
                        continue;
                    }
                    let pos = self.equals_pos(frag);
                    if pos == 0 && (self.config.split_rem || !line.is_joinable_rem(fi)) {
                        return highest;
                    }
                    highest = usize::max(highest,pos);
                } else if li == line_idx && fi == frag_idx {
                    started = true;
                } else if frag.is(FragmentKind::If) {
                    in_if = true;
                }
            }
            if started && in_if {
                break;
            }
        }
        highest
    }
    /// Wrap REM, DATA, or DIM according to the settings, otherwise a single piece
    fn wrap_fragment(&mut self, frag: &Fragment, frag_text: &str) -> Vec<String> {
        let len = frag_text.chars().count();
        let (width,break_char,name) = match frag.kind {
            FragmentKind::Rem => (self.config.wrap_rem_at,' ',"REM"),
            FragmentKind::Data => (self.config.wrap_data_at,',',"DATA"),
            FragmentKind::Dim if self.config.split_dim => {
                return match wrap::split_dim(frag_text) {
                    Some(pieces) => pieces,
                    None => {
                        self.anomaly(Anomaly::DimNotSplit);
                        vec![frag_text.to_string()]
                    }
                };
            },
            _ => return vec![frag_text.to_string()]
        };
        if width == 0 || len <= width {
            return vec![frag_text.to_string()];
        }
        let pieces = wrap::split_line(frag_text,width,break_char);
        if pieces.iter().any(|s| s.chars().count() > width) {
            self.anomaly(Anomaly::NoBreakPoint(name.to_string()));
        }
        pieces
    }
    /// Wrap the string literal of a PRINT or INPUT, if there is exactly one and it is long enough
    fn wrap_print(&self, frag: &Fragment, frag_text: &str) -> Option<Vec<String>> {
        if self.config.wrap_print_at == 0 {
            return None;
        }
        if !frag.is(FragmentKind::Print) && !frag.is(FragmentKind::Input) {
            return None;
        }
        if frag_text.matches('"').count() != 2 || frag.contains_control_chars() {
            return None;
        }
        wrap::split_print(frag_text,self.config.wrap_print_at)
    }
    /// Show machine code concealed in a REM
    fn inline_assembly(&mut self, program: &Program, frag: &Fragment, text: &str, full: &mut String) {
        let addr = program.load_address() + frag.start + 1;
        *full += &format!("{}REM - Inline assembler @ ${:02X} ({})\n",text,addr,addr);
        let padding = " ".repeat(text.chars().count() + 2);
        debug!("disassembling {} bytes at {}",frag.body.len()-1,addr);
        for asm in self.disassembler.disassemble(&frag.body[1..],addr) {
            *full += &padding;
            *full += &asm;
            full.push('\n');
        }
    }
    /// Reproduce a REM that uses backspace and return to format its text
    fn formatted_rem(&self, frag: &Fragment, text: &mut String) {
        *text += "REM ";
        for b in &frag.body[1..] {
            match *b {
                BACKSPACE => {
                    text.pop();
                },
                CARRIAGE_RETURN => text.push('\n'),
                x if x < 0x20 => if self.config.show_caret {
                    text.push('^');
                    text.push((x + 64) as char);
                },
                x if x > 127 => {},
                x => text.push(x as char)
            }
        }
    }
    fn trailers(&self, symbols: &Symbols, full: &mut String) {
        if self.config.show_xref {
            for (heading,map) in [("GOSUB:\n",&symbols.gosubs),("GOTO:\n",&symbols.gotos)] {
                if map.len() == 0 {
                    continue;
                }
                blank_line(full);
                *full += heading;
                for (target,sources) in map {
                    *full += &format!(" {:>5}  {}\n",target,bracketed(sources));
                }
            }
        }
        if self.config.show_symbols && symbols.variables.len() > 0 {
            blank_line(full);
            *full += "Variables:\n";
            for (name,lines) in &symbols.variables {
                *full += &format!("{:>6}  {}\n",name,bracketed(lines));
            }
            let mut heading_shown = false;
            for (key,names) in symbols.non_unique() {
                if !heading_shown {
                    heading_shown = true;
                    *full += "\nNon-unique Variable Names:\n";
                }
                *full += &format!("{:>6}  {}\n",key,bracketed(names));
            }
        }
        if self.config.list_strings && symbols.strings.len() > 0 {
            blank_line(full);
            *full += "Strings:\n";
            for (line,literal) in &symbols.strings {
                *full += &format!(" {:>5}  {}\n",line,literal);
            }
        }
    }
}

/// Name, length, and load address, followed by a blank line
pub fn header(program: &Program, name: &str) -> String {
    let len = program.img().len();
    let load = program.load_address();
    format!("Name    : {}\nLength  : ${:04X} ({})\nLoad at : ${:04X} ({})\n\n",
        name,len,crate::with_commas(len),load,crate::with_commas(load))
}
