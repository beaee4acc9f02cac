//! Quota snapshot types.

use chrono::{DateTime, Utc};

use super::parser::parse_snapshot;

/// Remaining quota for a single model
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuotaInfo {
    /// Remaining fraction of the quota (0.0 - 1.0)
    pub remaining_fraction: Option<f64>,
    /// When the quota is replenished
    pub reset_time: Option<DateTime<Utc>>,
}

/// Per-model quota entry, in the order the language server reports them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelQuota {
    /// Display label (e.g., "Gemini 3 Pro (High)")
    pub label: String,
    /// Only recommended models are shown on the dashboard
    pub is_recommended: bool,
    /// Quota details; absent for models without a limit
    pub quota_info: Option<QuotaInfo>,
}

impl ModelQuota {
    /// Remaining fraction, treating missing quota info as exhausted
    pub fn remaining_fraction(&self) -> f64 {
        self.quota_info
            .as_ref()
            .and_then(|q| q.remaining_fraction)
            .unwrap_or(0.0)
    }

    /// Reset timestamp, if the model has one
    pub fn reset_time(&self) -> Option<DateTime<Utc>> {
        self.quota_info.as_ref().and_then(|q| q.reset_time)
    }
}

/// Plan details
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanInfo {
    pub plan_name: Option<String>,
    /// Autocomplete fast mode
    pub fast_mode: bool,
    pub monthly_prompt_credits: Option<f64>,
    pub monthly_flow_credits: Option<f64>,
    /// Maximum chat input context, in tokens
    pub max_context_tokens: Option<u64>,
}

/// Complete quota snapshot received on one poll
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuotaSnapshot {
    /// Account tier label (e.g., "Pro")
    pub user_tier: Option<String>,
    pub plan_info: PlanInfo,
    pub available_prompt_credits: f64,
    pub available_flow_credits: f64,
    pub model_configs: Vec<ModelQuota>,
}

/// Collector output kept exactly as the collector printed it (modulo
/// whitespace), so the relay can forward it unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSnapshot(serde_json::Value);

impl RawSnapshot {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Parse collector stdout. Surrounding whitespace is ignored.
    pub fn from_output(output: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(output.trim()).map(Self)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }

    /// Typed view of the document
    pub fn snapshot(&self) -> Result<QuotaSnapshot, serde_json::Error> {
        parse_snapshot(&self.0)
    }
}

impl From<serde_json::Value> for RawSnapshot {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_output_trims_whitespace() {
        let raw = RawSnapshot::from_output("\r\n  {\"a\": 1}\r\n").unwrap();
        assert_eq!(raw.as_value()["a"], 1);
    }

    #[test]
    fn test_from_output_keeps_key_order() {
        let output = r#"{"zeta":1,"alpha":{"b":true,"a":null}}"#;
        let raw = RawSnapshot::from_output(output).unwrap();
        assert_eq!(serde_json::to_string(raw.as_value()).unwrap(), output);
    }

    #[test]
    fn test_from_output_rejects_garbage() {
        assert!(RawSnapshot::from_output("not json").is_err());
        assert!(RawSnapshot::from_output("").is_err());
    }

    #[test]
    fn test_remaining_fraction_defaults_to_zero() {
        let model = ModelQuota {
            label: "Unlimited".to_string(),
            is_recommended: true,
            quota_info: None,
        };
        assert_eq!(model.remaining_fraction(), 0.0);
        assert!(model.reset_time().is_none());
    }
}
