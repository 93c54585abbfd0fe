use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::PlanLimitDuration;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PromptMessage {
    pub id: i64,
    pub channel_id: i64,
    pub cost: f64,
    /// Unix seconds. `None` for messages recorded before timestamps existed.
    pub created_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub user_id: String,
    pub channel_id: i64,
}

/// Outcome of evaluating a channel's usage against the user's plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LimitCheck {
    pub user_id: String,
    pub channel_id: i64,
    pub plan: String,
    pub limit_duration: PlanLimitDuration,
    pub limit_amount: f64,
    pub usage: f64,
    /// Lower bound of the usage window in unix seconds, absent for lifetime plans.
    pub window_start: Option<i64>,
    pub limit_reached: bool,
}
