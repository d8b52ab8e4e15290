//! Indentation from loop and conditional nesting.
//!
//! Each line starts at the depth of the open FOR loops.  A FOR or IF indents whatever
//! follows it, while a NEXT closes loops before it is rendered.  An IF sets a floor
//! that a NEXT cannot go below until the line ends.

use super::{Fragment,FragmentKind};
use super::symbols::same_variable;

#[derive(Debug,Default)]
pub struct IndentTracker {
    loops: Vec<String>,
    indent: usize,
    if_indent: usize
}

impl IndentTracker {
    pub fn new() -> Self {
        Self::default()
    }
    /// Open loop variables, innermost last
    pub fn loops(&self) -> &[String] {
        &self.loops
    }
    pub fn indent(&self) -> usize {
        self.indent
    }
    /// An IF has been seen in the current line
    pub fn in_if(&self) -> bool {
        self.if_indent > 0
    }
    pub fn start_line(&mut self) {
        self.indent = self.loops.len();
        self.if_indent = 0;
    }
    /// Close loops for each variable of a NEXT, or the innermost loop for a naked NEXT.
    /// A variable that matches no open loop is ignored.  Returns true if anything closed.
    fn pop_loops(&mut self, frag: &Fragment) -> bool {
        let depth = self.loops.len();
        if frag.next_variables.len() == 0 {
            self.loops.pop();
        }
        for var in &frag.next_variables {
            if let Some(idx) = self.loops.iter().rposition(|v| same_variable(var,v)) {
                self.loops.truncate(idx);
            }
        }
        self.loops.len() < depth
    }
    /// Indent level to use for rendering the fragment
    pub fn enter(&mut self, frag: &Fragment) -> usize {
        if frag.is(FragmentKind::Next) && self.pop_loops(frag) {
            self.indent = usize::max(self.if_indent,self.loops.len());
        }
        self.indent
    }
    /// Apply changes that take effect after the fragment
    pub fn leave(&mut self, frag: &Fragment) {
        match frag.kind {
            FragmentKind::If => {
                self.indent += 1;
                self.if_indent = self.indent;
            },
            FragmentKind::For => {
                self.loops.push(frag.for_variable.clone());
                self.indent += 1;
            },
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::applesoft::JumpKind;

    fn frag(kind: FragmentKind, vars: &[&str]) -> Fragment {
        Fragment {
            start: 0,
            end: 0,
            body: Vec::new(),
            kind,
            first: false,
            assign_pos: 0,
            for_variable: match kind {
                FragmentKind::For => vars[0].to_string(),
                _ => String::new()
            },
            next_variables: match kind {
                FragmentKind::Next => vars.iter().map(|s| s.to_string()).collect(),
                _ => Vec::new()
            },
            on_expression: String::new(),
            on_jump: None::<JumpKind>
        }
    }

    #[test]
    fn nested_loops() {
        let mut t = IndentTracker::new();
        t.start_line();
        assert_eq!(t.enter(&frag(FragmentKind::For,&["I"])),0);
        t.leave(&frag(FragmentKind::For,&["I"]));
        assert_eq!(t.enter(&frag(FragmentKind::For,&["J"])),1);
        t.leave(&frag(FragmentKind::For,&["J"]));
        t.start_line();
        assert_eq!(t.indent(),2);
        assert_eq!(t.enter(&frag(FragmentKind::Next,&["J","I"])),0);
        assert_eq!(t.loops().len(),0);
    }
    #[test]
    fn truncated_match() {
        let mut t = IndentTracker::new();
        t.start_line();
        t.leave(&frag(FragmentKind::For,&["COUNT"]));
        assert_eq!(t.enter(&frag(FragmentKind::Next,&["CO"])),0);
    }
    #[test]
    fn unmatched_next() {
        let mut t = IndentTracker::new();
        t.start_line();
        t.leave(&frag(FragmentKind::For,&["I"]));
        assert_eq!(t.enter(&frag(FragmentKind::Next,&["K"])),1);
        assert_eq!(t.loops(),&["I".to_string()]);
        let mut empty = IndentTracker::new();
        empty.start_line();
        assert_eq!(empty.enter(&frag(FragmentKind::Next,&[])),0);
        assert_eq!(empty.enter(&frag(FragmentKind::Next,&["I"])),0);
    }
    #[test]
    fn if_floor() {
        let mut t = IndentTracker::new();
        t.start_line();
        t.leave(&frag(FragmentKind::For,&["I"]));
        t.start_line();
        assert_eq!(t.enter(&frag(FragmentKind::If,&[])),1);
        t.leave(&frag(FragmentKind::If,&[]));
        assert!(t.in_if());
        assert_eq!(t.enter(&frag(FragmentKind::Next,&[])),2);
        assert_eq!(t.loops().len(),0);
        t.start_line();
        assert_eq!(t.indent(),0);
        assert!(!t.in_if());
    }
}
