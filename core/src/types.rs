//! Shared primitive types used across the relay.

/// A gold amount in whole units. Submissions may use an "M" (millions)
/// suffix on the wire; stored amounts and totals are always integers.
pub type Gold = i64;
