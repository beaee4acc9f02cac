//! Display values derived from a [`QuotaSnapshot`].
//!
//! Everything here is a pure function of its inputs; percentages are
//! recomputed on every render and never stored in the snapshot.

use chrono::{DateTime, Utc};

use crate::snapshot::{ModelQuota, QuotaSnapshot};

/// Percentage below which a meter is drawn in the warning color
pub const WARNING_THRESHOLD_PERCENT: f64 = 20.0;

/// Color class for a meter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Normal,
    Warning,
}

impl Severity {
    pub fn from_percent(percent: f64) -> Self {
        if percent < WARNING_THRESHOLD_PERCENT {
            Severity::Warning
        } else {
            Severity::Normal
        }
    }
}

/// Remaining credits as a percentage of the monthly allotment.
///
/// An absent or non-positive allotment counts as 1 so the division is always
/// defined. The result is not clamped.
pub fn credit_percent(available: f64, monthly: Option<f64>) -> f64 {
    available / monthly_or_one(monthly) * 100.0
}

/// Monthly allotment used as the denominator for [`credit_percent`]
pub fn monthly_or_one(monthly: Option<f64>) -> f64 {
    match monthly {
        Some(m) if m > 0.0 => m,
        _ => 1.0,
    }
}

/// Remaining model quota as a percentage
pub fn model_percent(remaining_fraction: f64) -> f64 {
    remaining_fraction * 100.0
}

/// Model percentage rounded for the label (e.g. "75%")
pub fn model_percent_label(remaining_fraction: f64) -> String {
    format!("{}%", model_percent(remaining_fraction).round() as i64)
}

/// Time left until `target`, relative to `now`.
///
/// Returns `"Ready"` once the target has passed, `"{d}d {h}h"` when more than
/// 24 whole hours remain, and `"{h}h {m}m"` otherwise.
pub fn countdown(target: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff_ms = (target - now).num_milliseconds();
    if diff_ms <= 0 {
        return "Ready".to_string();
    }

    const HOUR_MS: i64 = 60 * 60 * 1000;
    const MINUTE_MS: i64 = 60 * 1000;

    let hours = diff_ms / HOUR_MS;
    let minutes = (diff_ms % HOUR_MS) / MINUTE_MS;

    if hours > 24 {
        format!("{}d {}h", hours / 24, hours % 24)
    } else {
        format!("{}h {}m", hours, minutes)
    }
}

/// Models shown on the dashboard, in snapshot order
pub fn recommended_models(snapshot: &QuotaSnapshot) -> impl Iterator<Item = &ModelQuota> {
    snapshot.model_configs.iter().filter(|m| m.is_recommended)
}

/// Format a number with comma thousands separators ("50,000").
/// Fractions are rounded to at most three decimals.
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = (value * 1000.0).round() / 1000.0;
    let negative = rounded < 0.0;
    let abs = rounded.abs();
    let whole = abs.trunc() as u64;
    let frac = abs - abs.trunc();

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative && (whole > 0 || frac > 0.0) {
        out.push('-');
    }
    out.push_str(&grouped);

    if frac > 0.0 {
        let frac_str = format!("{:.3}", frac);
        let trimmed = frac_str.trim_start_matches('0').trim_end_matches('0');
        if trimmed != "." {
            out.push_str(trimmed);
        }
    }
    out
}
