//! SQLite-backed tabular store.
//!
//! Tables are generic: a `tab` registry plus a `cell` table keyed by
//! (tab, row, column), so per-submitter tabs can appear at runtime
//! without schema changes. Cell values are stored as text — reads
//! surface strings regardless of backend.

use super::{CellValue, TableId, TableStore};
use crate::error::{StoreError, StoreResult};
use rusqlite::{params, Connection, OptionalExtension};

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the store at `path`.
    pub fn open(path: &str) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode: ignored by :memory: databases, so failure is fine.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory store (used in tests).
    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open(":memory:")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Apply all schema migrations in order.
    fn migrate(&self) -> StoreResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_tabs.sql"))?;
        Ok(())
    }

    fn table_name(&self, table: TableId) -> StoreResult<String> {
        self.conn
            .query_row(
                "SELECT name FROM tab WHERE tab_id = ?1",
                params![table.0],
                |row| row.get(0),
            )
            .optional()?
            .ok_or(StoreError::UnknownTable(table))
    }
}

impl TableStore for SqliteStore {
    fn get_or_create_table(&mut self, name: &str, header: &[&str]) -> StoreResult<TableId> {
        let existing: Option<i64> = self
            .conn
            .query_row(
                "SELECT tab_id FROM tab WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;
        if let Some(id) = existing {
            return Ok(TableId(id));
        }

        self.conn
            .execute("INSERT INTO tab (name) VALUES (?1)", params![name])?;
        let id = self.conn.last_insert_rowid();
        for (col, title) in header.iter().enumerate() {
            self.conn.execute(
                "INSERT INTO cell (tab_id, row_idx, col_idx, value) VALUES (?1, 0, ?2, ?3)",
                params![id, col as i64, title],
            )?;
        }
        Ok(TableId(id))
    }

    fn append_row(&mut self, table: TableId, row: &[CellValue]) -> StoreResult<()> {
        // Validates the handle as a side effect.
        self.table_name(table)?;

        let next: i64 = self.conn.query_row(
            "SELECT COALESCE(MAX(row_idx) + 1, 0) FROM cell WHERE tab_id = ?1",
            params![table.0],
            |r| r.get(0),
        )?;
        for (col, value) in row.iter().enumerate() {
            self.conn.execute(
                "INSERT INTO cell (tab_id, row_idx, col_idx, value) VALUES (?1, ?2, ?3, ?4)",
                params![table.0, next, col as i64, value.to_string()],
            )?;
        }
        Ok(())
    }

    fn read_all_rows(&self, table: TableId) -> StoreResult<Vec<Vec<String>>> {
        self.table_name(table)?;

        let mut stmt = self.conn.prepare(
            "SELECT row_idx, value FROM cell WHERE tab_id = ?1
             ORDER BY row_idx ASC, col_idx ASC",
        )?;
        let mut out: Vec<Vec<String>> = Vec::new();
        let mut rows = stmt.query(params![table.0])?;
        while let Some(r) = rows.next()? {
            let row_idx: i64 = r.get(0)?;
            let value: String = r.get(1)?;
            // row_idx values are contiguous by construction.
            if out.len() <= row_idx as usize {
                out.push(Vec::new());
            }
            out[row_idx as usize].push(value);
        }
        Ok(out)
    }

    fn update_cell(
        &mut self,
        table: TableId,
        row: usize,
        col: usize,
        value: CellValue,
    ) -> StoreResult<()> {
        let name = self.table_name(table)?;

        let changed = self.conn.execute(
            "UPDATE cell SET value = ?1 WHERE tab_id = ?2 AND row_idx = ?3 AND col_idx = ?4",
            params![value.to_string(), table.0, row as i64, col as i64],
        )?;
        if changed == 0 {
            return Err(StoreError::CellOutOfRange {
                table: name,
                row,
                col,
            });
        }
        Ok(())
    }
}
