//! Aggregation writer tests — the three projections and the totals
//! invariant.

use goldbook_core::{
    ledger::{Ledger, RECORD_HEADER, TOTALS_HEADER, TOTALS_TABLE},
    record::{parse_record, Record},
    store::{MemoryStore, SqliteStore, TableStore},
};

fn record(text: &str) -> Record {
    parse_record(text).expect("test input must parse")
}

fn ledger() -> Ledger<MemoryStore> {
    Ledger::open(MemoryStore::new()).unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// End-to-end projections
// ─────────────────────────────────────────────────────────────────────────────

/// One submission lands in all three projections with the documented
/// amount renderings: raw integer in the master log, compact string in
/// the tab and the totals FORMAT column.
#[test]
fn single_submission_reaches_all_three_projections() {
    let mut ledger = ledger();

    let summary = ledger.process(&record("Bob | 3M | Mage | SV2")).unwrap();
    assert_eq!(summary.submitter, "Bob");
    assert_eq!(summary.amount, "3M");
    assert_eq!(summary.server, "SV2");

    let master = ledger.store.read_all_rows(ledger.master()).unwrap();
    assert_eq!(master.len(), 2);
    assert_eq!(master[1], vec!["Bob", "3000000", "Mage", "SV2"]);

    let tab = ledger.store.get_or_create_table("BOB", &RECORD_HEADER).unwrap();
    let tab_rows = ledger.store.read_all_rows(tab).unwrap();
    assert_eq!(tab_rows.len(), 2);
    assert_eq!(tab_rows[1], vec!["Bob", "3M", "Mage", "SV2"]);

    let totals = ledger.store.read_all_rows(ledger.totals()).unwrap();
    assert_eq!(totals.len(), 2);
    assert_eq!(totals[1], vec!["SV2", "3000000", "3M"]);
}

#[test]
fn sqlite_backend_behaves_identically() {
    let mut ledger = Ledger::open(SqliteStore::in_memory().unwrap()).unwrap();

    ledger.process(&record("Bob | 3M | Mage | SV2")).unwrap();

    let master = ledger.store.read_all_rows(ledger.master()).unwrap();
    assert_eq!(master[1], vec!["Bob", "3000000", "Mage", "SV2"]);

    let totals = ledger.store.read_all_rows(ledger.totals()).unwrap();
    assert_eq!(totals[1], vec!["SV2", "3000000", "3M"]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Running totals
// ─────────────────────────────────────────────────────────────────────────────

/// The stored total for a server always equals the sum of amounts
/// recorded for it.
#[test]
fn totals_accumulate_across_submissions() {
    let mut ledger = ledger();

    ledger.process(&record("Alice | 1M | Warrior | SV1")).unwrap();
    ledger.process(&record("Bob | 500000 | Mage | SV1")).unwrap();

    let totals = ledger.store.read_all_rows(ledger.totals()).unwrap();
    assert_eq!(totals.len(), 2, "both submissions update the same row");
    assert_eq!(totals[1], vec!["SV1", "1500000", "1.5M"]);
}

/// A previously unseen server appends exactly one new row instead of
/// touching an existing one.
#[test]
fn new_server_appends_exactly_one_row() {
    let mut ledger = ledger();

    ledger.process(&record("Alice | 1M | Warrior | SV1")).unwrap();
    ledger.process(&record("Bob | 2M | Mage | SV2")).unwrap();

    let totals = ledger.store.read_all_rows(ledger.totals()).unwrap();
    assert_eq!(totals.len(), 3, "header plus one row per server");
    assert_eq!(totals[1][0], "SV1");
    assert_eq!(totals[2][0], "SV2");
    assert_eq!(totals[1], vec!["SV1", "1000000", "1M"]);
}

/// An existing total that fails to parse as an integer counts as zero
/// rather than failing the submission.
#[test]
fn unparseable_existing_total_counts_as_zero() {
    let mut store = MemoryStore::new();
    let totals = store
        .get_or_create_table(TOTALS_TABLE, &TOTALS_HEADER)
        .unwrap();
    store
        .append_row(totals, &["SV1".into(), "n/a".into(), "?".into()])
        .unwrap();

    let mut ledger = Ledger::open(store).unwrap();
    ledger.process(&record("Alice | 500 | Warrior | SV1")).unwrap();

    let rows = ledger.store.read_all_rows(ledger.totals()).unwrap();
    assert_eq!(rows.len(), 2, "the seeded row is updated, not duplicated");
    assert_eq!(rows[1], vec!["SV1", "500", "500"]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Key casing
// ─────────────────────────────────────────────────────────────────────────────

/// Display fields keep submitted casing; aggregation keys (tab name,
/// totals key) are uppercased.
#[test]
fn display_casing_is_kept_while_keys_are_uppercased() {
    let mut ledger = ledger();

    let summary = ledger.process(&record("alice | 1500 | Rogue | sv9")).unwrap();
    assert_eq!(summary.server, "sv9", "reply echoes the server as typed");

    let master = ledger.store.read_all_rows(ledger.master()).unwrap();
    assert_eq!(master[1], vec!["alice", "1500", "Rogue", "sv9"]);

    let names = ledger.store.table_names();
    assert!(names.contains(&"ALICE"), "tab key is uppercased: {names:?}");
    assert!(!names.contains(&"alice"));

    let totals = ledger.store.read_all_rows(ledger.totals()).unwrap();
    assert_eq!(totals[1][0], "SV9", "totals key is uppercased");
}

/// Tabs appear on the first submission from a new name and only then.
#[test]
fn submitter_tab_is_created_lazily() {
    let mut ledger = ledger();
    assert_eq!(
        ledger.store.table_names(),
        vec!["DATA", "TOTAL_PER_SERVER"],
        "no tabs before the first submission"
    );

    ledger.process(&record("Alice | 1M | Warrior | SV1")).unwrap();
    ledger.process(&record("ALICE | 2M | Warrior | SV1")).unwrap();

    let names = ledger.store.table_names();
    assert_eq!(
        names.iter().filter(|n| **n == "ALICE").count(),
        1,
        "both spellings share one tab"
    );

    let tab = ledger.store.get_or_create_table("ALICE", &RECORD_HEADER).unwrap();
    let rows = ledger.store.read_all_rows(tab).unwrap();
    assert_eq!(rows.len(), 3, "one header, two submissions");
}
