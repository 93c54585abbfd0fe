use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    errors::Result,
    models::CustomerSubscription,
    services::store::UsageStore,
};

pub mod queries;

use queries::{SubscriptionQueries, UsageQueries};

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UsageStore for Database {
    async fn latest_subscription(&self, user_id: &str) -> Result<Option<CustomerSubscription>> {
        SubscriptionQueries::latest_for_user(&self.pool, user_id).await
    }

    async fn channel_usage(&self, channel_id: i64, since: Option<i64>) -> Result<f64> {
        UsageQueries::sum_cost(&self.pool, channel_id, since).await
    }
}
