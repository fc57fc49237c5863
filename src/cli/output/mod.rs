//! Output formatting for CLI commands
//!
//! Human-readable tables, or pretty JSON when `--json` is given.

pub mod table;

use anyhow::Result;
use serde::Serialize;

pub use table::TableFormatter;

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
