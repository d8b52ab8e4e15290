//! Anomalies found while decoding or rendering.
//!
//! Decoding never stops on malformed input.  Instead each problem is recorded
//! here, tagged with the line number where it was found, and the caller decides
//! what to do with it.  Every diagnostic is also sent to the logger.

use thiserror::Error;
use log::{debug,warn};

#[derive(Error,Debug,Clone,PartialEq)]
pub enum Anomaly {
    #[error("REM token in the middle of a statement")]
    MidLineRem,
    #[error("IF without THEN or GOTO")]
    IfWithoutThen,
    #[error("ON without GOTO or GOSUB")]
    OnWithoutTarget,
    #[error("ON target is not a line number: {0}")]
    BadOnTarget(String),
    #[error("{0} without a line number")]
    MissingTarget(String),
    #[error("line is not terminated")]
    UnterminatedLine,
    #[error("no break point for wrapping: {0}")]
    NoBreakPoint(String),
    #[error("DIM statement could not be split")]
    DimNotSplit
}

impl Anomaly {
    /// Rendering anomalies only affect the layout of one fragment
    pub fn is_rendering(&self) -> bool {
        matches!(self,Self::NoBreakPoint(_) | Self::DimNotSplit)
    }
}

#[derive(Debug,Clone,PartialEq)]
pub struct Diagnostic {
    pub line: u16,
    pub anomaly: Anomaly
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f,"line {}: {}",self.line,self.anomaly)
    }
}

/// Log the anomaly and add it to the list
pub fn push(diagnostics: &mut Vec<Diagnostic>, line: u16, anomaly: Anomaly) {
    let diag = Diagnostic { line, anomaly };
    match diag.anomaly.is_rendering() {
        true => debug!("{}",diag),
        false => warn!("{}",diag)
    }
    diagnostics.push(diag);
}
