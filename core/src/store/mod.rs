//! Tabular store abstraction.
//!
//! RULE: Only this module knows what a backend looks like.
//! The ledger sees named tables with a header row, append-ordered data
//! rows, and single-cell updates — nothing else. That is the whole
//! capability set the relay needs from a spreadsheet-like service.
//!
//! Reads always come back as strings, the way spreadsheet APIs surface
//! cell contents; writes accept strings or integers.

mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::{StoreError, StoreResult};
use crate::types::Gold;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to a table inside one store.
///
/// Handles are only meaningful against the store that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableId(pub(crate) i64);

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single cell value as accepted by writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Int(Gold),
    Text(String),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Int(n) => write!(f, "{n}"),
            CellValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<Gold> for CellValue {
    fn from(n: Gold) -> Self {
        CellValue::Int(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

/// The operations the relay needs from any tabular backend.
pub trait TableStore {
    /// Look up a table by name, creating it with `header` written as
    /// its first row if absent. Safe to call repeatedly — creation
    /// happens at most once per name.
    fn get_or_create_table(&mut self, name: &str, header: &[&str]) -> StoreResult<TableId>;

    /// Append one row at the end. Ordering across calls is preserved;
    /// no uniqueness is enforced.
    fn append_row(&mut self, table: TableId, row: &[CellValue]) -> StoreResult<()>;

    /// Full scan in append order, header row included.
    fn read_all_rows(&self, table: TableId) -> StoreResult<Vec<Vec<String>>>;

    /// Overwrite a single cell in place. Indices are zero-based and
    /// count the header row, matching what `read_all_rows` returns.
    fn update_cell(
        &mut self,
        table: TableId,
        row: usize,
        col: usize,
        value: CellValue,
    ) -> StoreResult<()>;
}

// ── In-memory backend ──────────────────────────────────────────────

struct MemTable {
    name: String,
    rows: Vec<Vec<String>>,
}

/// Volatile backend. Default choice in tests and for dry runs.
#[derive(Default)]
pub struct MemoryStore {
    tables: Vec<MemTable>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of all existing tables, in creation order.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }

    fn table(&self, id: TableId) -> StoreResult<&MemTable> {
        self.tables
            .get(id.0 as usize)
            .ok_or(StoreError::UnknownTable(id))
    }

    fn table_mut(&mut self, id: TableId) -> StoreResult<&mut MemTable> {
        self.tables
            .get_mut(id.0 as usize)
            .ok_or(StoreError::UnknownTable(id))
    }
}

impl TableStore for MemoryStore {
    fn get_or_create_table(&mut self, name: &str, header: &[&str]) -> StoreResult<TableId> {
        if let Some(idx) = self.tables.iter().position(|t| t.name == name) {
            return Ok(TableId(idx as i64));
        }
        self.tables.push(MemTable {
            name: name.to_string(),
            rows: vec![header.iter().map(|h| h.to_string()).collect()],
        });
        Ok(TableId((self.tables.len() - 1) as i64))
    }

    fn append_row(&mut self, table: TableId, row: &[CellValue]) -> StoreResult<()> {
        let table = self.table_mut(table)?;
        table.rows.push(row.iter().map(CellValue::to_string).collect());
        Ok(())
    }

    fn read_all_rows(&self, table: TableId) -> StoreResult<Vec<Vec<String>>> {
        Ok(self.table(table)?.rows.clone())
    }

    fn update_cell(
        &mut self,
        table: TableId,
        row: usize,
        col: usize,
        value: CellValue,
    ) -> StoreResult<()> {
        let t = self.table_mut(table)?;
        let name = t.name.clone();
        let cell = t
            .rows
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(StoreError::CellOutOfRange {
                table: name,
                row,
                col,
            })?;
        *cell = value.to_string();
        Ok(())
    }
}
