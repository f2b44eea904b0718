//! Decoder for the plain-text rain forecast.
//!
//! The body holds one line per five-minute slot, `<code>|<time label>`, e.g.
//!
//! ```text
//! 077|14:05
//! 000|14:10
//! ```

use crate::error::{Error, Result};
use crate::model::RainData;

const SHAPE: &str = "RainData";

/// Decode every line of a rain text payload, all or nothing.
///
/// Blank lines (including the trailing line break) are ignored. The time label
/// is kept exactly as sent, only the code is trimmed. A code made
/// only of dashes is the feed's "no data" marker and yields
/// [`RainData::no_data`]; any other non-numeric code fails the whole payload.
pub fn decode_rain_text(payload: &str) -> Result<Vec<RainData>> {
    payload
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| decode_line(index + 1, line))
        .collect()
}

fn decode_line(number: usize, line: &str) -> Result<RainData> {
    let (code, label) = line.split_once('|').ok_or_else(|| {
        Error::decode(
            SHAPE,
            format!("line {number}: missing '|' delimiter in {line:?}"),
        )
    })?;

    let code = code.trim();

    if !code.is_empty() && code.chars().all(|c| c == '-') {
        return Ok(RainData::no_data(label));
    }

    let code = code.parse::<u8>().map_err(|_| {
        Error::decode(
            SHAPE,
            format!("line {number}: invalid intensity code {code:?} in {line:?}"),
        )
    })?;

    Ok(RainData::new(code, label))
}
