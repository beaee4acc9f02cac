//! Quota snapshot model.
//!
//! A collector emits the language server's user status document. The relay
//! forwards that document verbatim ([`RawSnapshot`]); the dashboard reads the
//! typed [`QuotaSnapshot`] view out of it.

mod parser;
mod types;

pub use parser::parse_snapshot;
pub use types::{ModelQuota, PlanInfo, QuotaInfo, QuotaSnapshot, RawSnapshot};
