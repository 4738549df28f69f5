use crate::Result;
use core::fmt::Write;
use serde::Serialize;

/// Pretty-printed JSON for any report payload.
pub fn generate<T: Serialize, W: Write>(report: &T, writer: &mut W) -> Result<()> {
    write!(writer, "{}", serde_json::to_string_pretty(report)?)?;
    Ok(())
}
