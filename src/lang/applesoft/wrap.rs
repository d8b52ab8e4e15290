//! Wrapping strategies for long statements.
//!
//! These work on rendered text.  Each returns the pieces of the statement, and the
//! caller decides how to indent the continuation lines.

use regex::Regex;

const RCH: &str = "unreachable was reached";

/// Split `line` at `break_char` so that pieces fit in `width`.  Continuation pieces are
/// indented past the first word, and the break must come after that point.  A space is
/// dropped at the break, any other break character stays at the end of its piece.
/// If no break point is found the rest of the line is left as is, so a piece may exceed `width`.
pub fn split_line(line: &str, width: usize, break_char: char) -> Vec<String> {
    let mut ans = Vec::new();
    let mut curr: Vec<char> = line.chars().collect();
    let floor = curr.iter().position(|c| *c==' ').unwrap_or(curr.len());
    let prefix = " ".repeat(floor + 1);
    let keep = match break_char {
        ' ' => 0,
        _ => 1
    };
    while width > 0 && curr.len() > width {
        let mut ptr = usize::min(width - keep, curr.len() - 1);
        while ptr > floor && curr[ptr] != break_char {
            ptr -= 1;
        }
        if ptr <= floor {
            break;
        }
        ans.push(curr[0..ptr+keep].iter().collect::<String>());
        curr = [prefix.chars().collect::<Vec<char>>(),curr[ptr+1..].to_vec()].concat();
    }
    ans.push(curr.iter().collect());
    ans
}

/// Put each array declarator of a DIM statement in its own piece.
/// Returns None unless the declarators cover the whole argument list.
pub fn split_dim(line: &str) -> Option<Vec<String>> {
    let args = line.strip_prefix("DIM ")?;
    let re = Regex::new(r"[A-Z][A-Z0-9]*[$%]?\([^()]*\)[,:]?").expect(RCH);
    let pieces: Vec<&str> = re.find_iter(args).map(|m| m.as_str()).collect();
    if pieces.len() == 0 || pieces.concat() != args {
        return None;
    }
    Some(pieces.iter().enumerate().map(|(i,m)| {
        match i {
            0 => ["DIM ",m].concat(),
            _ => ["    ",m].concat()
        }
    }).collect())
}

/// Break the string literal of `PRINT "..."` or `INPUT "..."` into pieces of `width`
/// characters.  The first piece keeps the keyword, later pieces are padded to line up
/// with the literal, and the last piece keeps whatever follows the literal.
/// Returns None if the statement does not start with a literal, or the literal is short enough.
pub fn split_print(line: &str, width: usize) -> Option<Vec<String>> {
    if width == 0 || !(line.starts_with("PRINT \"") || line.starts_with("INPUT \"")) {
        return None;
    }
    let chars: Vec<char> = line.chars().collect();
    let lead = 7;
    let close = chars[lead..].iter().position(|c| *c=='"')? + lead;
    let mut remaining = close - lead;
    if remaining <= width {
        return None;
    }
    let mut ans = Vec::new();
    let mut padding: String = chars[0..lead].iter().collect();
    let mut rest = &chars[lead..];
    loop {
        let n = usize::min(width,rest.len());
        let piece: String = rest[0..n].iter().collect();
        rest = &rest[n..];
        if remaining > width {
            remaining -= width;
            ans.push([padding.as_str(),&piece].concat());
        } else {
            let tail: String = rest.iter().collect();
            ans.push([padding.as_str(),&piece,&tail].concat());
            break;
        }
        padding = " ".repeat(lead);
    }
    Some(ans)
}
