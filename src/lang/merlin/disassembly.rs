//! Module to transform object code into Merlin style source lines
//!
//! Each line shows the address, the object bytes, the mnemonic, and the operand.
//! Branch operands are resolved to absolute addresses.  Bytes that do not begin
//! a complete legal instruction are shown with `DFB`.

use std::collections::HashMap;
use hex::ToHex;
use crate::lang::Disassemble;
use super::{MachineOperation,opcodes};

struct DasmLine {
    address: usize,
    bytes: Vec<u8>,
    instruction: String,
    operand: String
}

pub struct Disassembler {
    dasm_map: HashMap<u8,MachineOperation>,
    dasm_lines: Vec<DasmLine>,
    std_patt: regex::Regex
}

fn u32_from_operand(slice: &[u8]) -> u32 {
    let mut bytes = [0,0,0,0];
    for i in 0..slice.len() {
        bytes[i] = slice[i]
    }
    u32::from_le_bytes(bytes)
}

fn hex_from_val(prefix: &str, val: u32, bytes: usize) -> String {
    let mut ans = String::new();
    let be_bytes = val.to_be_bytes();
    for i in 4-bytes..4 {
        ans += &format!("{:02X}",be_bytes[i]);
    }
    [prefix.to_string(),ans].concat()
}

/// Destination of a branch at `addr` with displacement `val`, wrapping within 16 bits
fn rel_to_abs(addr: usize, val: u32) -> u32 {
    let disp = val as u8 as i8 as i64;
    ((addr as i64 + 2 + disp) & 0xffff) as u32
}

impl Disassembler {
    pub fn new() -> Self {
        let mut dasm_map = HashMap::new();
        for (op,mnemonic,snippet) in opcodes::OPCODES {
            dasm_map.insert(*op,MachineOperation::new(mnemonic,snippet));
        }
        Self {
            dasm_map,
            dasm_lines: Vec::new(),
            std_patt: regex::Regex::new(r"[0-9]").expect(super::RCH)
        }
    }
    /// Check if we have a valid instruction and enough bytes left to accommodate it.
    fn is_instruction(&self, val: u8, ptr: usize, end: usize) -> Option<(MachineOperation,usize)> {
        let op = self.dasm_map.get(&val)?;
        let operand_bytes = match self.std_patt.find(&op.operand_snippet) {
            Some(m) => usize::from_str_radix(m.as_str(),10).expect(super::RCH),
            None => 0
        };
        match ptr + 1 + operand_bytes <= end {
            true => Some((op.clone(),operand_bytes)),
            false => None
        }
    }
    fn push_instruction(&mut self, buf: &[u8], ptr: usize, addr: usize, op: MachineOperation, operand_bytes: usize) {
        let mut operand = String::new();
        if operand_bytes > 0 {
            let mut val = u32_from_operand(&buf[ptr+1..ptr+1+operand_bytes]);
            let mut width = operand_bytes;
            if op.relative {
                val = rel_to_abs(addr,val);
                width = 2;
            }
            operand = op.operand_snippet.replace(&operand_bytes.to_string(),&hex_from_val("$",val,width));
        }
        self.dasm_lines.push(DasmLine {
            address: addr,
            bytes: buf[ptr..ptr+1+operand_bytes].to_vec(),
            instruction: op.mnemonic,
            operand
        });
    }
    fn push_data(&mut self, byte: u8, addr: usize) {
        self.dasm_lines.push(DasmLine {
            address: addr,
            bytes: vec![byte],
            instruction: "DFB".to_string(),
            operand: hex_from_val("$",byte as u32,1)
        });
    }
    fn format_lines(&self) -> Vec<String> {
        self.dasm_lines.iter().map(|line| {
            let obj: String = line.bytes.encode_hex_upper();
            format!("{:04X}:  {:<9} {:<4}{}",line.address & 0xffff,obj,line.instruction,line.operand)
                .trim_end()
                .to_string()
        }).collect()
    }
}

impl Disassemble for Disassembler {
    /// Disassemble `buf` as if it were loaded at `addr`, interpreting as code wherever possible.
    fn disassemble(&mut self, buf: &[u8], addr: usize) -> Vec<String> {
        self.dasm_lines = Vec::new();
        let mut ptr = 0;
        while ptr < buf.len() {
            match self.is_instruction(buf[ptr],ptr,buf.len()) {
                Some((op,operand_bytes)) => {
                    self.push_instruction(buf,ptr,addr+ptr,op,operand_bytes);
                    ptr += 1 + operand_bytes;
                },
                None => {
                    self.push_data(buf[ptr],addr+ptr);
                    ptr += 1;
                }
            }
        }
        self.format_lines()
    }
}
