//! # Merlin style 6502 disassembly
//!
//! Applesoft programs sometimes hide machine code inside REM statements.
//! This module turns such bytes into Merlin style mnemonics, one line per instruction.
//! Only the legal 6502 operations are recognized, anything else is shown as data.

pub mod opcodes;
pub mod disassembly;

const RCH: &str = "unreachable was reached";

#[derive(Clone,Debug)]
pub struct MachineOperation {
    pub mnemonic: String,
    /// this is a snippet, such as `(1),Y`, where the digit is bytes of data, and can be replaced by a value
    pub operand_snippet: String,
    pub relative: bool
}

impl MachineOperation {
    pub fn new(mnemonic: &str, operand_snippet: &str) -> Self {
        Self {
            mnemonic: mnemonic.to_string(),
            operand_snippet: operand_snippet.to_string(),
            relative: opcodes::is_relative(mnemonic)
        }
    }
}
