//! Migration of day logs from the legacy unsharded format
//!
//! ## Formats
//!
//! - **v1** (`daylogs_v1`): a single JSON object mapping date → day log for
//!   the whole history
//! - **v2** (`daylogs_v2_<YYYY-MM>`): one JSON object per calendar month
//!
//! The v1 blob is copied to `daylogs_v1_backup` (once, never overwritten),
//! merged into the month shards with existing shard entries taking
//! precedence, and then deleted. The storage handle carries a latch so the
//! check runs at most once per handle.

mod legacy_types;
mod migrate;
mod normalize;

pub use legacy_types::LegacyDayLog;
pub use migrate::{MigrationReport, ensure_migrated, migrate_legacy_day_logs};
pub use normalize::{normalize_note, normalize_string_line_endings};
