//! Result printing.

use crate::error::CliError;

use std::io::Write;

use serde_json::Value;

/// Write `value` as pretty JSON (two-space indent, UTF-8 kept as-is)
/// followed by a newline.
#[track_caller]
pub fn write_json<W: Write>(out: &mut W, value: &Value) -> Result<(), CliError> {
    let text = match serde_json::to_string_pretty(value) {
        Ok(text) => text,
        Err(e) => return Err(CliError::output(format!("Failed to encode result: {e}"))),
    };

    if let Err(e) = writeln!(out, "{text}").and_then(|()| out.flush()) {
        return Err(CliError::output(format!("Failed to write result: {e}")));
    }

    Ok(())
}
