use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanLimitDuration {
    Daily,
    Monthly,
    Lifetime,
}

impl PlanLimitDuration {
    /// Start of the usage window ending at `now`, as unix seconds.
    ///
    /// Windows are rolling: a daily plan looks back 24 hours, a monthly plan one
    /// calendar month (clamped to the end of shorter months). Lifetime plans have
    /// no lower bound.
    pub fn window_start(&self, now: DateTime<Utc>) -> Option<i64> {
        match self {
            PlanLimitDuration::Daily => Some((now - chrono::Duration::days(1)).timestamp()),
            PlanLimitDuration::Monthly => Some(
                now.checked_sub_months(Months::new(1))
                    .unwrap_or(DateTime::<Utc>::MIN_UTC)
                    .timestamp(),
            ),
            PlanLimitDuration::Lifetime => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanLimitDuration::Daily => "daily",
            PlanLimitDuration::Monthly => "monthly",
            PlanLimitDuration::Lifetime => "lifetime",
        }
    }
}

impl fmt::Display for PlanLimitDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanLimitDuration {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(PlanLimitDuration::Daily),
            "monthly" => Ok(PlanLimitDuration::Monthly),
            "lifetime" => Ok(PlanLimitDuration::Lifetime),
            other => Err(anyhow::anyhow!("Unknown plan limit duration: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanConfig {
    pub name: String,
    pub limit_amount: f64,
    pub limit_duration: PlanLimitDuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    Basic,
    Premium,
}

/// The two configured plans a user can fall into.
#[derive(Debug, Clone, PartialEq)]
pub struct Plans {
    pub basic: PlanConfig,
    pub premium: PlanConfig,
}

impl Plans {
    pub fn for_tier(&self, tier: PlanTier) -> &PlanConfig {
        match tier {
            PlanTier::Basic => &self.basic,
            PlanTier::Premium => &self.premium,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserPlanResponse {
    pub user_id: String,
    pub tier: PlanTier,
    pub plan: PlanConfig,
}
