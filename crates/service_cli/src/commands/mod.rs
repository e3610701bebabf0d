//! CLI command implementations
//!
//! Each submodule loads one request type, runs the engines and builds a
//! serialisable report. Reports go to stdout as JSON; logs go to stderr.

pub mod bond;
pub mod option;

use serde::Serialize;

use crate::Result;

/// Encodes `report` as JSON.
pub fn render<T: Serialize>(report: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    Ok(json)
}

/// Writes `report` to stdout as JSON.
pub fn emit<T: Serialize>(report: &T, pretty: bool) -> Result<()> {
    println!("{}", render(report, pretty)?);
    Ok(())
}
