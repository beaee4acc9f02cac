//! Read a [`QuotaSnapshot`] out of the language server user status document.
//!
//! Expected shape (every field optional):
//! ```text
//! { "userStatus": {
//!     "userTier": { "name": "Pro" },
//!     "planStatus": {
//!       "planInfo": { "planName", "hasAutocompleteFastMode", "monthlyPromptCredits",
//!                     "monthlyFlowCredits", "maxNumChatInputTokens" },
//!       "availablePromptCredits": 500, "availableFlowCredits": 100 },
//!     "cascadeModelConfigData": {
//!       "clientModelConfigs": [ { "label", "isRecommended",
//!                                 "quotaInfo": { "remainingFraction", "resetTime" } } ] } } }
//! ```
//!
//! The language server renders int64 fields as strings, so numbers are
//! accepted in either form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use super::types::{ModelQuota, PlanInfo, QuotaInfo, QuotaSnapshot};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct WireDocument {
    user_status: WireUserStatus,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct WireUserStatus {
    user_tier: Option<WireUserTier>,
    plan_status: WirePlanStatus,
    cascade_model_config_data: WireModelConfigData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireUserTier {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct WirePlanStatus {
    plan_info: WirePlanInfo,
    #[serde(deserialize_with = "number_or_string")]
    available_prompt_credits: Option<f64>,
    #[serde(deserialize_with = "number_or_string")]
    available_flow_credits: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct WirePlanInfo {
    plan_name: Option<String>,
    has_autocomplete_fast_mode: bool,
    #[serde(deserialize_with = "number_or_string")]
    monthly_prompt_credits: Option<f64>,
    #[serde(deserialize_with = "number_or_string")]
    monthly_flow_credits: Option<f64>,
    #[serde(deserialize_with = "number_or_string")]
    max_num_chat_input_tokens: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct WireModelConfigData {
    client_model_configs: Vec<WireModelConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct WireModelConfig {
    label: String,
    is_recommended: bool,
    quota_info: Option<WireQuotaInfo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct WireQuotaInfo {
    #[serde(deserialize_with = "number_or_string")]
    remaining_fraction: Option<f64>,
    reset_time: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(f64),
    Text(String),
}

/// Accept `123`, `123.5` or `"123"`; anything unparsable becomes `None`
fn number_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Numeric>::deserialize(deserializer)?;
    Ok(match value {
        Some(Numeric::Number(n)) => Some(n),
        Some(Numeric::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

fn parse_reset_time(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Build the typed snapshot from a collector document
pub fn parse_snapshot(value: &serde_json::Value) -> Result<QuotaSnapshot, serde_json::Error> {
    let doc = WireDocument::deserialize(value)?;
    let status = doc.user_status;
    let plan = status.plan_status.plan_info;

    let model_configs = status
        .cascade_model_config_data
        .client_model_configs
        .into_iter()
        .map(|m| ModelQuota {
            label: m.label,
            is_recommended: m.is_recommended,
            quota_info: m.quota_info.map(|q| QuotaInfo {
                remaining_fraction: q.remaining_fraction,
                reset_time: q.reset_time.as_deref().and_then(parse_reset_time),
            }),
        })
        .collect();

    Ok(QuotaSnapshot {
        user_tier: status.user_tier.and_then(|t| t.name),
        plan_info: PlanInfo {
            plan_name: plan.plan_name,
            fast_mode: plan.has_autocomplete_fast_mode,
            monthly_prompt_credits: plan.monthly_prompt_credits,
            monthly_flow_credits: plan.monthly_flow_credits,
            max_context_tokens: plan
                .max_num_chat_input_tokens
                .filter(|n| *n >= 0.0)
                .map(|n| n as u64),
        },
        available_prompt_credits: status.plan_status.available_prompt_credits.unwrap_or(0.0),
        available_flow_credits: status.plan_status.available_flow_credits.unwrap_or(0.0),
        model_configs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_full_document() {
        let doc = json!({
            "userStatus": {
                "userTier": { "name": "Pro", "id": "g1-pro-tier" },
                "planStatus": {
                    "planInfo": {
                        "planName": "Pro",
                        "hasAutocompleteFastMode": true,
                        "monthlyPromptCredits": 50000,
                        "monthlyFlowCredits": "150000",
                        "maxNumChatInputTokens": "16384"
                    },
                    "availablePromptCredits": 42000,
                    "availableFlowCredits": 9000
                },
                "cascadeModelConfigData": {
                    "clientModelConfigs": [
                        {
                            "label": "Gemini 3 Pro (High)",
                            "isRecommended": true,
                            "quotaInfo": {
                                "remainingFraction": 0.75,
                                "resetTime": "2026-10-20T08:00:00Z"
                            }
                        },
                        { "label": "Legacy", "isRecommended": false }
                    ]
                }
            }
        });

        let snapshot = parse_snapshot(&doc).unwrap();
        assert_eq!(snapshot.user_tier.as_deref(), Some("Pro"));
        assert_eq!(snapshot.plan_info.plan_name.as_deref(), Some("Pro"));
        assert!(snapshot.plan_info.fast_mode);
        assert_eq!(snapshot.plan_info.monthly_prompt_credits, Some(50000.0));
        assert_eq!(snapshot.plan_info.monthly_flow_credits, Some(150000.0));
        assert_eq!(snapshot.plan_info.max_context_tokens, Some(16384));
        assert_eq!(snapshot.available_prompt_credits, 42000.0);
        assert_eq!(snapshot.available_flow_credits, 9000.0);
        assert_eq!(snapshot.model_configs.len(), 2);

        let first = &snapshot.model_configs[0];
        assert_eq!(first.label, "Gemini 3 Pro (High)");
        assert_eq!(first.remaining_fraction(), 0.75);
        assert_eq!(
            first.reset_time(),
            Some(Utc.with_ymd_and_hms(2026, 10, 20, 8, 0, 0).unwrap())
        );
        assert!(!snapshot.model_configs[1].is_recommended);
        assert!(snapshot.model_configs[1].quota_info.is_none());
    }

    #[test]
    fn test_parse_empty_document_uses_defaults() {
        let snapshot = parse_snapshot(&json!({})).unwrap();
        assert_eq!(snapshot, QuotaSnapshot::default());
    }

    #[test]
    fn test_parse_invalid_numbers_and_times() {
        let doc = json!({
            "userStatus": {
                "planStatus": {
                    "planInfo": { "monthlyPromptCredits": "lots" },
                    "availablePromptCredits": null
                },
                "cascadeModelConfigData": {
                    "clientModelConfigs": [
                        { "label": "X", "quotaInfo": { "resetTime": "tomorrow" } }
                    ]
                }
            }
        });

        let snapshot = parse_snapshot(&doc).unwrap();
        assert_eq!(snapshot.plan_info.monthly_prompt_credits, None);
        assert_eq!(snapshot.available_prompt_credits, 0.0);
        assert_eq!(snapshot.model_configs[0].reset_time(), None);
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(parse_snapshot(&json!("not a document")).is_err());
    }
}
