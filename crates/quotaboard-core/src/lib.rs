//! Core library for quotaboard.
//!
//! Holds the quota snapshot model read from the language server status
//! document, the pure display computations derived from it, and the
//! collectors that produce the document.

pub mod collector;
pub mod display;
pub mod snapshot;

pub use collector::{CollectorError, QuotaCollector, ScriptCollector, StaticCollector};
pub use snapshot::{ModelQuota, PlanInfo, QuotaInfo, QuotaSnapshot, RawSnapshot};
