//! One parsed submission.

use crate::error::{RelayError, RelayResult};
use crate::gold::parse_gold;
use crate::types::Gold;
use serde::{Deserialize, Serialize};

/// The field separator submissions must use.
pub const FIELD_SEPARATOR: char = '|';

/// A single parsed submission. Field casing is kept exactly as
/// submitted — aggregation keys are uppercased at the write site, not
/// here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub submitter: String,
    pub amount: Gold,
    pub character: String,
    pub server: String,
}

/// Parse `NAME | AMOUNT | CHARACTER | SERVER` into a [`Record`].
///
/// The text must split into exactly four fields; each field is trimmed
/// of surrounding whitespace. No validation beyond that — empty names
/// pass, and the amount only has to be numeric.
pub fn parse_record(text: &str) -> RelayResult<Record> {
    let fields: Vec<&str> = text.split(FIELD_SEPARATOR).map(str::trim).collect();
    if fields.len() != 4 {
        return Err(RelayError::MalformedInput {
            found: fields.len(),
        });
    }

    Ok(Record {
        submitter: fields[0].to_string(),
        amount: parse_gold(fields[1])?,
        character: fields[2].to_string(),
        server: fields[3].to_string(),
    })
}
