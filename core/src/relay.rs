//! Top-level message handling.
//!
//! RULE: This is the only place errors are swallowed.
//! Everything below returns typed errors; `handle_message` decides
//! what the sender sees — a reply on success, silence on any failure.
//! Internal error detail never reaches the sender.

use crate::error::{RelayError, RelayResult};
use crate::ledger::{Ledger, SuccessSummary};
use crate::record::{parse_record, FIELD_SEPARATOR};
use crate::store::TableStore;

/// The parse-then-write pipeline behind one chat handler.
pub struct Relay<S: TableStore> {
    pub ledger: Ledger<S>,
}

impl<S: TableStore> Relay<S> {
    pub fn new(store: S) -> RelayResult<Self> {
        Ok(Self {
            ledger: Ledger::open(store)?,
        })
    }

    /// Handle one inbound chat message. Returns the reply to send, or
    /// `None` when the message is ignored or dropped.
    ///
    /// Messages without a separator are not submissions (commands,
    /// chit-chat) and are ignored outright.
    pub fn handle_message(&mut self, text: &str) -> Option<String> {
        if !text.contains(FIELD_SEPARATOR) {
            return None;
        }

        match self.try_record(text) {
            Ok(summary) => Some(reply_text(&summary)),
            Err(RelayError::MalformedInput { found }) => {
                log::debug!("dropped message with {found} fields");
                None
            }
            Err(RelayError::InvalidAmount { raw }) => {
                log::debug!("dropped message with non-numeric amount '{raw}'");
                None
            }
            Err(RelayError::Store(err)) => {
                // Completed writes stay in place; no rollback.
                log::error!("store write failed: {err}");
                None
            }
        }
    }

    /// Parse and record one submission, typed errors out.
    pub fn try_record(&mut self, text: &str) -> RelayResult<SuccessSummary> {
        let record = parse_record(text)?;
        Ok(self.ledger.process(&record)?)
    }
}

/// The confirmation sent back for a recorded submission.
pub fn reply_text(summary: &SuccessSummary) -> String {
    format!(
        "✅ {} tercatat: {} ({})",
        summary.submitter, summary.amount, summary.server
    )
}
