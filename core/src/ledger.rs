//! The aggregation writer — three projections per submission.
//!
//! WRITE ORDER (fixed, documented, never reordered):
//!   1. Master log: raw record, amount as integer.
//!   2. Per-submitter tab: record with the amount rendered compactly.
//!   3. Per-server running total: update in place, or append on first
//!      sight of the server.
//!
//! No rollback on partial failure — a master row may exist without its
//! tab row. The totals invariant (TOTAL equals the sum of recorded
//! amounts for that server) re-establishes on the next successful
//! record for the same server.

use crate::error::StoreResult;
use crate::gold::format_gold;
use crate::record::Record;
use crate::store::{TableId, TableStore};
use crate::types::Gold;
use serde::Serialize;

/// Master log table: every submission verbatim.
pub const MASTER_TABLE: &str = "DATA";
/// Running totals table: one row per server.
pub const TOTALS_TABLE: &str = "TOTAL_PER_SERVER";

/// Header shared by the master log and every per-submitter tab.
pub const RECORD_HEADER: [&str; 4] = ["NAMA", "GOLD", "CHAR", "SERVER"];
pub const TOTALS_HEADER: [&str; 3] = ["SERVER", "TOTAL", "FORMAT"];

/// What the relay tells the sender after a successful submission.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessSummary {
    pub submitter: String,
    /// Compact rendering of the recorded amount ("3M").
    pub amount: String,
    /// Server exactly as submitted — the totals key is uppercased, the
    /// reply is not.
    pub server: String,
}

/// Owns the store and the two fixed table handles. Per-submitter tabs
/// are resolved lazily, one per distinct uppercased name.
pub struct Ledger<S: TableStore> {
    pub store: S,
    master: TableId,
    totals: TableId,
}

impl<S: TableStore> Ledger<S> {
    /// Resolve (or create) the fixed tables and wire up the writer.
    pub fn open(mut store: S) -> StoreResult<Self> {
        let master = store.get_or_create_table(MASTER_TABLE, &RECORD_HEADER)?;
        let totals = store.get_or_create_table(TOTALS_TABLE, &TOTALS_HEADER)?;
        Ok(Self {
            store,
            master,
            totals,
        })
    }

    pub fn master(&self) -> TableId {
        self.master
    }

    pub fn totals(&self) -> TableId {
        self.totals
    }

    /// Record one submission: master row, tab row, total bump.
    pub fn process(&mut self, record: &Record) -> StoreResult<SuccessSummary> {
        self.store.append_row(
            self.master,
            &[
                record.submitter.as_str().into(),
                record.amount.into(),
                record.character.as_str().into(),
                record.server.as_str().into(),
            ],
        )?;

        let tab_name = record.submitter.to_uppercase();
        let tab = self.store.get_or_create_table(&tab_name, &RECORD_HEADER)?;
        self.store.append_row(
            tab,
            &[
                record.submitter.as_str().into(),
                format_gold(record.amount).into(),
                record.character.as_str().into(),
                record.server.as_str().into(),
            ],
        )?;

        self.bump_server_total(&record.server, record.amount)?;

        Ok(SuccessSummary {
            submitter: record.submitter.clone(),
            amount: format_gold(record.amount),
            server: record.server.clone(),
        })
    }

    /// Linear scan over the totals table for the uppercased server key;
    /// update the matching row in place, or append one for a new
    /// server. O(rows), fine at one row per distinct server.
    fn bump_server_total(&mut self, server: &str, amount: Gold) -> StoreResult<()> {
        let key = server.to_uppercase();
        let rows = self.store.read_all_rows(self.totals)?;

        // The header row is index 0; "SERVER" never matches an
        // uppercased key, so the scan walks straight past it.
        for (i, row) in rows.iter().enumerate() {
            if row.first().map(String::as_str) != Some(key.as_str()) {
                continue;
            }
            // Unparseable existing totals count as 0.
            let existing: Gold = row
                .get(1)
                .and_then(|v| v.parse().ok())
                .unwrap_or(0);
            let total = existing + amount;
            self.store.update_cell(self.totals, i, 1, total.into())?;
            self.store
                .update_cell(self.totals, i, 2, format_gold(total).into())?;
            return Ok(());
        }

        self.store.append_row(
            self.totals,
            &[key.as_str().into(), amount.into(), format_gold(amount).into()],
        )
    }
}
