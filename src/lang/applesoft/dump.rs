//! Hex listing of a program image, one block per line record.
//!
//! This is the debugging view: it shows exactly which bytes were decoded as each line,
//! where the program ended, and what follows it.

use super::Program;
use super::settings::Settings;
use super::listing::header;
use crate::hex_dump;

/// Hex dump each line record at its load address.  The end-of-program link follows
/// the last line, and anything after that is dumped separately.
pub fn hex_listing(program: &Program, config: &Settings, name: &str) -> String {
    let img = program.img();
    if img.len() < 2 {
        return hex_dump(img,0,img.len(),0);
    }
    let load = program.load_address();
    let mut ans = String::new();
    if config.show_header {
        ans += &header(program,name);
    }
    let mut blocks: Vec<String> = program.lines.iter().map(|line| {
        hex_dump(img,line.start,line.end - line.start,load + line.start)
    }).collect();
    let ptr = program.end_of_program();
    let marker = usize::min(2,img.len() - ptr);
    if marker > 0 {
        blocks.push(hex_dump(img,ptr,marker,load + ptr));
    }
    if ptr + marker < img.len() {
        blocks.push(hex_dump(img,ptr + marker,img.len() - ptr - marker,load + ptr + marker));
    }
    ans += &blocks.join("\n\n");
    ans
}
