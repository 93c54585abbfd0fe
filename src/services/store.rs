use async_trait::async_trait;

use crate::{errors::Result, models::CustomerSubscription};

/// Reads the plan evaluator needs from persistent storage.
#[async_trait]
pub trait UsageStore: Send + Sync {
    /// Latest subscription for the user by recency, if any.
    async fn latest_subscription(&self, user_id: &str) -> Result<Option<CustomerSubscription>>;

    /// Summed prompt cost for the channel, optionally restricted to messages created
    /// at or after `since` (unix seconds). An empty sum is 0.
    async fn channel_usage(&self, channel_id: i64, since: Option<i64>) -> Result<f64>;
}
