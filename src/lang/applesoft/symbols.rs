//! Cross references and symbol tables.
//!
//! These are filled in as a side effect of tokenizing, and are read-only afterwards.
//! All maps are ordered by key, so that trailers and JSON output are deterministic.

use std::collections::BTreeMap;
use serde_json::json;
use super::{LEFT_PAREN,DOLLAR,PERCENT};

#[derive(Clone,Debug,Default)]
pub struct Symbols {
    /// target line -> lines that GOTO it
    pub gotos: BTreeMap<u16,Vec<u16>>,
    /// target line -> lines that GOSUB it
    pub gosubs: BTreeMap<u16,Vec<u16>>,
    /// variable name -> lines that reference it
    pub variables: BTreeMap<String,Vec<u16>>,
    /// truncated name -> full names that the interpreter cannot tell apart
    pub collisions: BTreeMap<String,Vec<String>>,
    /// (line, literal with its quotes) in program order
    pub strings: Vec<(u16,String)>
}

/// Add `src` to the list unless it is already the last entry
fn push_dedup(list: &mut Vec<u16>, src: u16) {
    if list.last() != Some(&src) {
        list.push(src);
    }
}

/// The name as the interpreter sees it: two significant characters followed by any
/// type suffix and array marker.  Names with 2 or fewer significant characters are unchanged.
pub fn collision_key(symbol: &str) -> String {
    let bytes = symbol.as_bytes();
    if bytes.len() == 0 {
        return String::new();
    }
    let mut ptr = bytes.len() - 1;
    if bytes[ptr] == LEFT_PAREN && ptr > 0 {
        ptr -= 1;
    }
    if (bytes[ptr] == DOLLAR || bytes[ptr] == PERCENT) && ptr > 0 {
        ptr -= 1;
    }
    match ptr <= 1 {
        true => symbol.to_string(),
        false => [&symbol[0..2], &symbol[ptr+1..]].concat()
    }
}

/// Loop variables match if identical, or if both have at least 2 characters and
/// the first 2 agree.
pub fn same_variable(v1: &str, v2: &str) -> bool {
    if v1 == v2 {
        return true;
    }
    let (b1,b2) = (v1.as_bytes(),v2.as_bytes());
    b1.len() >= 2 && b2.len() >= 2 && b1[0..2] == b2[0..2]
}

impl Symbols {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn add_goto(&mut self, target: u16, src: u16) {
        push_dedup(self.gotos.entry(target).or_insert(Vec::new()),src);
    }
    pub fn add_gosub(&mut self, target: u16, src: u16) {
        push_dedup(self.gosubs.entry(target).or_insert(Vec::new()),src);
    }
    /// Record a variable reference and fold it into the collision table
    pub fn add_variable(&mut self, name: &str, line: u16) {
        push_dedup(self.variables.entry(name.to_string()).or_insert(Vec::new()),line);
        let bucket = self.collisions.entry(collision_key(name)).or_insert(Vec::new());
        if !bucket.iter().any(|s| s==name) {
            bucket.push(name.to_string());
        }
    }
    pub fn add_string(&mut self, line: u16, literal: &str) {
        self.strings.push((line,literal.to_string()));
    }
    pub fn is_goto_target(&self, line: u16) -> bool {
        self.gotos.contains_key(&line)
    }
    pub fn is_gosub_target(&self, line: u16) -> bool {
        self.gosubs.contains_key(&line)
    }
    pub fn is_target(&self, line: u16) -> bool {
        self.is_goto_target(line) || self.is_gosub_target(line)
    }
    /// Buckets holding more than one name
    pub fn non_unique(&self) -> impl Iterator<Item = (&String,&Vec<String>)> {
        self.collisions.iter().filter(|(_,names)| names.len() > 1)
    }
    /// All tables as a JSON object
    pub fn to_json(&self) -> serde_json::Value {
        let xref = |map: &BTreeMap<u16,Vec<u16>>| -> serde_json::Value {
            let mut obj = serde_json::Map::new();
            for (k,v) in map {
                obj.insert(k.to_string(),json!(v));
            }
            serde_json::Value::Object(obj)
        };
        let strings: Vec<serde_json::Value> = self.strings.iter().map(|(line,s)| {
            json!({"line": line, "text": s})
        }).collect();
        json!({
            "gosub": xref(&self.gosubs),
            "goto": xref(&self.gotos),
            "variables": self.variables,
            "collisions": self.non_unique().collect::<BTreeMap<&String,&Vec<String>>>(),
            "strings": strings
        })
    }
}
