#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Mutex;

use plan_limits::{
    errors::Result,
    models::{CustomerSubscription, PlanConfig, PlanLimitDuration, Plans, PromptMessage, SubscriptionStatus},
    services::store::UsageStore,
};

/// In-memory stand-in for the Postgres tables.
#[derive(Default)]
pub struct MemoryStore {
    subscriptions: Mutex<Vec<CustomerSubscription>>,
    messages: Mutex<Vec<PromptMessage>>,
}

impl MemoryStore {
    pub fn add_subscription(
        &self,
        user_id: &str,
        status: SubscriptionStatus,
        updated_at: DateTime<Utc>,
    ) {
        let mut subscriptions = self.subscriptions.lock().unwrap();
        let id = subscriptions.len() as i64 + 1;
        subscriptions.push(CustomerSubscription {
            id,
            user_id: user_id.to_string(),
            status,
            created_at: updated_at,
            updated_at,
        });
    }

    pub fn add_message(&self, channel_id: i64, cost: f64, created_at: Option<i64>) {
        let mut messages = self.messages.lock().unwrap();
        let id = messages.len() as i64 + 1;
        messages.push(PromptMessage {
            id,
            channel_id,
            cost,
            created_at,
        });
    }
}

#[async_trait]
impl UsageStore for MemoryStore {
    async fn latest_subscription(&self, user_id: &str) -> Result<Option<CustomerSubscription>> {
        Ok(self
            .subscriptions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.user_id == user_id)
            .max_by_key(|s| (s.updated_at, s.created_at, s.id))
            .cloned())
    }

    async fn channel_usage(&self, channel_id: i64, since: Option<i64>) -> Result<f64> {
        Ok(self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.channel_id == channel_id)
            .filter(|m| match since {
                Some(since) => m.created_at.map_or(false, |t| t >= since),
                None => true,
            })
            .map(|m| m.cost)
            .sum())
    }
}

pub fn test_plans() -> Plans {
    Plans {
        basic: PlanConfig {
            name: "basic".to_string(),
            limit_amount: 1.0,
            limit_duration: PlanLimitDuration::Lifetime,
        },
        premium: PlanConfig {
            name: "premium".to_string(),
            limit_amount: 5.0,
            limit_duration: PlanLimitDuration::Daily,
        },
    }
}
