//! # Language Module
//!
//! Language specific operations are in the submodules:
//! * `applesoft` decodes tokenized Applesoft BASIC into annotated listings
//! * `merlin` disassembles 6502 object code, needed when BASIC conceals machine code
//!
//! This module holds the pieces they share, such as the settings helpers.

pub mod applesoft;
pub mod merlin;

use thiserror::Error;

#[derive(Error,Debug)]
pub enum Error {
    #[error("Settings could not be parsed")]
    Settings
}

/// Turns object code into source lines.
/// The listing uses this when a REM statement conceals machine code.
pub trait Disassemble {
    /// Disassemble `bytes` as if loaded at `addr`, one line of text per instruction.
    fn disassemble(&mut self, bytes: &[u8], addr: usize) -> Vec<String>;
}

/// Try to update a boolean from a serde `Value` presumed to be an object.
/// If there is any error do not change the value.
pub fn update_json_bool(maybe_obj: &serde_json::Value, key: &str, curr: &mut bool) {
    if let Some(obj) = maybe_obj.as_object() {
        if let Some(x) = obj.get(key) {
            if let Some(b) = x.as_bool() {
                *curr = b;
            }
        }
    }
}

/// Try to update an unsigned integer from a serde `Value` presumed to be an object.
/// If there is any error do not change the value.
pub fn update_json_usize(maybe_obj: &serde_json::Value, key: &str, curr: &mut usize) {
    if let Some(obj) = maybe_obj.as_object() {
        if let Some(x) = obj.get(key) {
            if let Some(n) = x.as_u64() {
                if let Ok(val) = usize::try_from(n) {
                    *curr = val;
                }
            }
        }
    }
}
