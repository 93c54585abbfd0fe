use sqlx::PgPool;

use crate::errors::Result;
use crate::models::*;

pub struct SubscriptionQueries;

impl SubscriptionQueries {
    pub async fn create(
        pool: &PgPool,
        user_id: &str,
        status: SubscriptionStatus,
    ) -> Result<CustomerSubscription> {
        let subscription = sqlx::query_as::<_, CustomerSubscription>(
            r#"
            INSERT INTO customer_subscriptions (user_id, status)
            VALUES ($1, $2)
            RETURNING id, user_id, status, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(status)
        .fetch_one(pool)
        .await?;

        Ok(subscription)
    }

    /// Most recently updated subscription for the user; ties fall back to creation
    /// time, then insertion order.
    pub async fn latest_for_user(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Option<CustomerSubscription>> {
        let subscription = sqlx::query_as::<_, CustomerSubscription>(
            r#"
            SELECT id, user_id, status, created_at, updated_at
            FROM customer_subscriptions
            WHERE user_id = $1
            ORDER BY updated_at DESC, created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(subscription)
    }
}

pub struct UsageQueries;

impl UsageQueries {
    pub async fn record_prompt_cost(
        pool: &PgPool,
        channel_id: i64,
        cost: f64,
        created_at: Option<i64>,
    ) -> Result<PromptMessage> {
        let message = sqlx::query_as::<_, PromptMessage>(
            r#"
            INSERT INTO prompt_messages (channel_id, cost, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, channel_id, cost, created_at
            "#,
        )
        .bind(channel_id)
        .bind(cost)
        .bind(created_at)
        .fetch_one(pool)
        .await?;

        Ok(message)
    }

    /// Total cost for a channel. With `since`, only messages stamped at or after it
    /// count, so unstamped rows fall out of every window.
    pub async fn sum_cost(pool: &PgPool, channel_id: i64, since: Option<i64>) -> Result<f64> {
        let usage: Option<f64> = match since {
            Some(since) => {
                sqlx::query_scalar(
                    "SELECT SUM(cost) FROM prompt_messages WHERE channel_id = $1 AND created_at >= $2",
                )
                .bind(channel_id)
                .bind(since)
                .fetch_one(pool)
                .await?
            }
            None => {
                sqlx::query_scalar("SELECT SUM(cost) FROM prompt_messages WHERE channel_id = $1")
                    .bind(channel_id)
                    .fetch_one(pool)
                    .await?
            }
        };

        Ok(usage.unwrap_or(0.0))
    }
}
