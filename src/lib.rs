//! # `a2list` main library
//!
//! This library turns tokenized Applesoft BASIC programs back into readable listings.
//! Along the way it reconstructs the information a reverse engineer usually wants:
//! which lines jump to which, where each variable is used, and which variable names
//! the interpreter would confuse because it only looks at the first two characters.
//!
//! ## Architecture
//!
//! The work is done in one forward pass followed by a render pass:
//! * `lang::applesoft::tokenizer` splits the program image into lines and statement fragments,
//!   building the cross reference, symbol, and string tables as it goes
//! * `lang::applesoft::indent` tracks loop and conditional nesting over the fragments
//! * `lang::applesoft::listing` produces the final text, applying the wrapping and alignment
//!   options in `lang::applesoft::settings`
//!
//! Machine code hidden in REM statements is handed to `lang::merlin::disassembly`.
//! Trailing bytes are shown using `hex_dump`.
//!
//! Nothing in the decoding path aborts.  Malformed programs are decoded as far as possible,
//! and every anomaly is reported in a diagnostics list that accompanies the text.

pub mod lang;
pub mod commands;

use std::fmt::Write;

pub type DYNERR = Box<dyn std::error::Error>;
pub type STDRESULT = Result<(),Box<dyn std::error::Error>>;

/// Format `length` bytes of `buf`, starting at `offset`, in columns of hex, +ascii, and -ascii.
/// The row labels start at `start_addr`.  Rows are separated by newlines, with no trailing newline.
/// Requests that run past the end of the buffer are clipped.
pub fn hex_dump(buf: &[u8], offset: usize, length: usize, start_addr: usize) -> String {
    let end = usize::min(offset.saturating_add(length), buf.len());
    let mut ans = String::new();
    let mut slice_start = offset;
    while slice_start < end {
        let row_label = start_addr + slice_start - offset;
        let slice_end = usize::min(slice_start + 16, end);
        let slice = &buf[slice_start..slice_end];
        let txt: Vec<u8> = slice.iter().map(|c| match *c {
            x if x<32 => '.' as u8,
            x if x<127 => x,
            _ => '.' as u8
        }).collect();
        let neg_txt: Vec<u8> = slice.iter().map(|c| match *c {
            x if x>=160 && x<255 => x - 128,
            _ => 46
        }).collect();
        if ans.len() > 0 {
            ans += "\n";
        }
        write!(ans,"{:04X} : ",row_label).expect("unreachable");
        for byte in slice {
            write!(ans,"{:02X} ",byte).expect("unreachable");
        }
        for _blank in slice_end..slice_start+16 {
            ans += "   ";
        }
        write!(ans,"|+| {} ",String::from_utf8_lossy(&txt)).expect("unreachable");
        for _blank in slice_end..slice_start+16 {
            ans += " ";
        }
        write!(ans,"|-| {}",String::from_utf8_lossy(&neg_txt)).expect("unreachable");
        slice_start = slice_end;
    }
    ans
}

/// Decimal with thousands separators, e.g., `2,049`
pub fn with_commas(val: usize) -> String {
    let digits = val.to_string();
    let mut ans = String::new();
    for (i,c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            ans.push(',');
        }
        ans.push(c);
    }
    ans
}

#[test]
fn test_hex_dump() {
    let buf: Vec<u8> = (0x40..0x52).collect();
    let dump = hex_dump(&buf,0,buf.len(),0x801);
    let rows: Vec<&str> = dump.lines().collect();
    assert_eq!(rows.len(),2);
    assert!(rows[0].starts_with("0801 : 40 41 42"));
    assert!(rows[0].contains("|+| @ABCDEFGHIJKLMNO"));
    assert!(rows[1].starts_with("0811 : 50 51 "));
    assert!(!dump.ends_with("\n"));
    assert_eq!(hex_dump(&buf,20,4,0),"");
}

#[test]
fn test_with_commas() {
    assert_eq!(with_commas(0),"0");
    assert_eq!(with_commas(999),"999");
    assert_eq!(with_commas(2049),"2,049");
    assert_eq!(with_commas(1234567),"1,234,567");
}
