//! goldbook-core — message-triggered gold-contribution bookkeeping.
//!
//! One inbound chat message carries one submission:
//!
//!   NAME | AMOUNT | CHARACTER | SERVER
//!
//! The relay parses it into a [`record::Record`] and writes three
//! projections into a tabular store: the master log, a per-submitter
//! tab, and a per-server running total.
//!
//! RULE: Only the store module talks to a backend.
//! The ledger goes through [`store::TableStore`] operations — it never
//! touches a connection or a table vector directly.

pub mod config;
pub mod error;
pub mod gold;
pub mod ledger;
pub mod record;
pub mod relay;
pub mod store;
pub mod types;
