//! Collector returning a fixed document.

use chrono::{Duration, SecondsFormat, Utc};
use serde_json::json;

use super::{CollectorError, QuotaCollector};
use crate::snapshot::RawSnapshot;

/// Always yields the same document
#[derive(Debug, Clone)]
pub struct StaticCollector {
    document: RawSnapshot,
}

impl StaticCollector {
    pub fn new(document: impl Into<RawSnapshot>) -> Self {
        Self {
            document: document.into(),
        }
    }

    /// Document returned on every fetch
    pub fn document(&self) -> &RawSnapshot {
        &self.document
    }

    /// Representative status document with reset times relative to now
    pub fn sample() -> Self {
        let now = Utc::now();
        let reset = |d: Duration| (now + d).to_rfc3339_opts(SecondsFormat::Secs, true);

        Self::new(json!({
            "userStatus": {
                "name": "Demo User",
                "userTier": { "id": "g1-pro-tier", "name": "Google AI Pro" },
                "planStatus": {
                    "planInfo": {
                        "planName": "Pro",
                        "hasAutocompleteFastMode": true,
                        "monthlyPromptCredits": 50000,
                        "monthlyFlowCredits": 150000,
                        "maxNumChatInputTokens": "16384"
                    },
                    "availablePromptCredits": 41250,
                    "availableFlowCredits": 21800
                },
                "cascadeModelConfigData": {
                    "clientModelConfigs": [
                        {
                            "label": "Gemini 3 Pro (High)",
                            "isRecommended": true,
                            "quotaInfo": {
                                "remainingFraction": 0.82,
                                "resetTime": reset(Duration::minutes(212))
                            }
                        },
                        {
                            "label": "Gemini 3 Flash",
                            "isRecommended": true,
                            "quotaInfo": {
                                "remainingFraction": 1.0,
                                "resetTime": reset(Duration::minutes(-3))
                            }
                        },
                        {
                            "label": "Claude Sonnet 4.5 (Thinking)",
                            "isRecommended": true,
                            "quotaInfo": {
                                "remainingFraction": 0.12,
                                "resetTime": reset(Duration::hours(50))
                            }
                        },
                        {
                            "label": "GPT-OSS 120B (Medium)",
                            "isRecommended": true
                        },
                        {
                            "label": "Gemini 2.5 Pro (Legacy)",
                            "isRecommended": false,
                            "quotaInfo": { "remainingFraction": 0.5 }
                        }
                    ]
                }
            }
        }))
    }
}

impl QuotaCollector for StaticCollector {
    async fn fetch_snapshot(&self) -> Result<RawSnapshot, CollectorError> {
        Ok(self.document.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::recommended_models;

    #[tokio::test]
    async fn test_sample_parses() {
        let raw = StaticCollector::sample().fetch_snapshot().await.unwrap();
        let snapshot = raw.snapshot().unwrap();

        assert_eq!(snapshot.user_tier.as_deref(), Some("Google AI Pro"));
        assert_eq!(snapshot.model_configs.len(), 5);
        assert_eq!(recommended_models(&snapshot).count(), 4);
        assert!(snapshot.model_configs[0].reset_time().is_some());
    }
}
