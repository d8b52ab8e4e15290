//! Rendering options for Applesoft listings.
//!
//! The options can be set directly, or parsed from a JSON object whose keys
//! are the camelCase option names, e.g., `{"showTargets": true, "wrapRemAt": 40}`.
//! Keys that are not recognized are ignored.

use serde_json;
use crate::DYNERR;
use crate::lang::{update_json_bool,update_json_usize};

#[derive(Clone,Debug,PartialEq)]
pub struct Settings {
    pub show_header: bool,
    /// direction markers for GOTO/GOSUB, reserves a gutter before the line numbers
    pub show_targets: bool,
    /// blank out line numbers that are never referenced
    pub only_show_target_line_numbers: bool,
    pub align_assign: bool,
    /// start a new line for a REM that follows other statements
    pub split_rem: bool,
    pub delete_extra_rem_space: bool,
    pub delete_extra_data_space: bool,
    pub split_dim: bool,
    /// 0 disables
    pub wrap_rem_at: usize,
    /// 0 disables
    pub wrap_data_at: usize,
    /// 0 disables
    pub wrap_print_at: usize,
    pub show_xref: bool,
    pub show_symbols: bool,
    pub list_strings: bool,
    pub blank_after_return: bool,
    pub show_then: bool,
    /// show control characters as `^X`, otherwise they are dropped
    pub show_caret: bool
}

impl Settings {
    pub fn new() -> Self {
        Self {
            show_header: true,
            show_targets: false,
            only_show_target_line_numbers: false,
            align_assign: true,
            split_rem: false,
            delete_extra_rem_space: false,
            delete_extra_data_space: false,
            split_dim: false,
            wrap_rem_at: 60,
            wrap_data_at: 60,
            wrap_print_at: 0,
            show_xref: false,
            show_symbols: false,
            list_strings: false,
            blank_after_return: false,
            show_then: true,
            show_caret: false
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

pub fn parse(json: &str) -> Result<Settings,DYNERR> {
    let mut ans = Settings::new();
    let root = serde_json::from_str::<serde_json::Value>(json)?;
    if !root.is_object() {
        return Err(Box::new(crate::lang::Error::Settings));
    }
    update_json_bool(&root,"showHeader",&mut ans.show_header);
    update_json_bool(&root,"showTargets",&mut ans.show_targets);
    update_json_bool(&root,"onlyShowTargetLineNumbers",&mut ans.only_show_target_line_numbers);
    update_json_bool(&root,"alignAssign",&mut ans.align_assign);
    update_json_bool(&root,"splitRem",&mut ans.split_rem);
    update_json_bool(&root,"deleteExtraRemSpace",&mut ans.delete_extra_rem_space);
    update_json_bool(&root,"deleteExtraDataSpace",&mut ans.delete_extra_data_space);
    update_json_bool(&root,"splitDim",&mut ans.split_dim);
    update_json_usize(&root,"wrapRemAt",&mut ans.wrap_rem_at);
    update_json_usize(&root,"wrapDataAt",&mut ans.wrap_data_at);
    update_json_usize(&root,"wrapPrintAt",&mut ans.wrap_print_at);
    update_json_bool(&root,"showXref",&mut ans.show_xref);
    update_json_bool(&root,"showSymbols",&mut ans.show_symbols);
    update_json_bool(&root,"listStrings",&mut ans.list_strings);
    update_json_bool(&root,"blankAfterReturn",&mut ans.blank_after_return);
    update_json_bool(&root,"showThen",&mut ans.show_then);
    update_json_bool(&root,"showCaret",&mut ans.show_caret);
    Ok(ans)
}
