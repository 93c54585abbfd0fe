use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::{
    errors::Result,
    models::{CustomerSubscription, LimitCheck, PlanConfig, PlanLimitDuration, PlanTier, Plans},
    services::store::UsageStore,
};

/// Evaluates one user's plan against one channel's usage.
///
/// The plan is resolved once, when the evaluator is built; every limit check
/// afterwards re-reads usage from the store.
pub struct PlanLogic {
    store: Arc<dyn UsageStore>,
    user_id: String,
    channel_id: i64,
    tier: PlanTier,
    plan: PlanConfig,
}

impl PlanLogic {
    pub async fn new(
        store: Arc<dyn UsageStore>,
        plans: &Plans,
        user_id: impl Into<String>,
        channel_id: i64,
    ) -> Result<Self> {
        let user_id = user_id.into();
        let (tier, plan) = Self::get_current_plan(store.as_ref(), plans, &user_id).await?;

        Ok(Self {
            store,
            user_id,
            channel_id,
            tier,
            plan,
        })
    }

    pub fn tier(&self) -> PlanTier {
        self.tier
    }

    pub fn plan(&self) -> &PlanConfig {
        &self.plan
    }

    pub async fn get_subscription(
        store: &dyn UsageStore,
        user_id: &str,
    ) -> Result<Option<CustomerSubscription>> {
        let subscription = store.latest_subscription(user_id).await?;
        tracing::debug!("Subscription: {:?}", subscription);
        Ok(subscription)
    }

    pub fn is_premium(subscription: Option<&CustomerSubscription>) -> bool {
        match subscription {
            Some(subscription) => {
                tracing::debug!("Subscription status: {}", subscription.status);
                subscription.status.is_active()
            }
            None => false,
        }
    }

    pub async fn get_current_plan(
        store: &dyn UsageStore,
        plans: &Plans,
        user_id: &str,
    ) -> Result<(PlanTier, PlanConfig)> {
        let subscription = Self::get_subscription(store, user_id).await?;

        let tier = if Self::is_premium(subscription.as_ref()) {
            tracing::info!("User {} is premium", user_id);
            PlanTier::Premium
        } else {
            tracing::info!("User {} is basic", user_id);
            PlanTier::Basic
        };

        Ok((tier, plans.for_tier(tier).clone()))
    }

    pub async fn is_plan_limit_reached(&self) -> Result<bool> {
        self.is_plan_limit_reached_at(Utc::now()).await
    }

    pub async fn is_plan_limit_reached_at(&self, now: DateTime<Utc>) -> Result<bool> {
        match self.plan.limit_duration {
            PlanLimitDuration::Daily => self.is_day_limit_reached_at(now).await,
            PlanLimitDuration::Monthly => self.is_month_limit_reached_at(now).await,
            PlanLimitDuration::Lifetime => self.is_lifetime_limit_reached().await,
        }
    }

    pub async fn is_day_limit_reached(&self) -> Result<bool> {
        self.is_day_limit_reached_at(Utc::now()).await
    }

    pub async fn is_day_limit_reached_at(&self, now: DateTime<Utc>) -> Result<bool> {
        Ok(self.check_window(PlanLimitDuration::Daily, now).await?.limit_reached)
    }

    pub async fn is_month_limit_reached(&self) -> Result<bool> {
        self.is_month_limit_reached_at(Utc::now()).await
    }

    pub async fn is_month_limit_reached_at(&self, now: DateTime<Utc>) -> Result<bool> {
        Ok(self.check_window(PlanLimitDuration::Monthly, now).await?.limit_reached)
    }

    pub async fn is_lifetime_limit_reached(&self) -> Result<bool> {
        Ok(self
            .check_window(PlanLimitDuration::Lifetime, Utc::now())
            .await?
            .limit_reached)
    }

    pub async fn get_daily_usage(&self) -> Result<f64> {
        self.get_daily_usage_at(Utc::now()).await
    }

    pub async fn get_daily_usage_at(&self, now: DateTime<Utc>) -> Result<f64> {
        self.usage_for(PlanLimitDuration::Daily, now).await
    }

    pub async fn get_monthly_usage(&self) -> Result<f64> {
        self.get_monthly_usage_at(Utc::now()).await
    }

    pub async fn get_monthly_usage_at(&self, now: DateTime<Utc>) -> Result<f64> {
        self.usage_for(PlanLimitDuration::Monthly, now).await
    }

    pub async fn get_lifetime_usage(&self) -> Result<f64> {
        self.store.channel_usage(self.channel_id, None).await
    }

    /// Full report for the plan's own duration.
    pub async fn check(&self) -> Result<LimitCheck> {
        self.check_at(Utc::now()).await
    }

    pub async fn check_at(&self, now: DateTime<Utc>) -> Result<LimitCheck> {
        self.check_window(self.plan.limit_duration, now).await
    }

    async fn usage_for(&self, duration: PlanLimitDuration, now: DateTime<Utc>) -> Result<f64> {
        self.store
            .channel_usage(self.channel_id, duration.window_start(now))
            .await
    }

    async fn check_window(
        &self,
        duration: PlanLimitDuration,
        now: DateTime<Utc>,
    ) -> Result<LimitCheck> {
        let window_start = duration.window_start(now);
        let usage = self.store.channel_usage(self.channel_id, window_start).await?;
        let limit_reached = usage >= self.plan.limit_amount;

        tracing::info!(
            "Usage: {}, user: {}, channel: {}, plan: {}, duration: {}, limit: {}, result: {}",
            usage,
            self.user_id,
            self.channel_id,
            self.plan.name,
            duration,
            self.plan.limit_amount,
            limit_reached
        );

        Ok(LimitCheck {
            user_id: self.user_id.clone(),
            channel_id: self.channel_id,
            plan: self.plan.name.clone(),
            limit_duration: duration,
            limit_amount: self.plan.limit_amount,
            usage,
            window_start,
            limit_reached,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubscriptionStatus;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Returns fixed answers and remembers the windows it was asked for.
    struct FixedStore {
        subscription: Option<CustomerSubscription>,
        usage: f64,
        windows: Mutex<Vec<Option<i64>>>,
    }

    impl FixedStore {
        fn new(status: Option<SubscriptionStatus>, usage: f64) -> Arc<Self> {
            let subscription = status.map(|status| CustomerSubscription {
                id: 1,
                user_id: "user-1".to_string(),
                status,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            });
            Arc::new(Self {
                subscription,
                usage,
                windows: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl UsageStore for FixedStore {
        async fn latest_subscription(&self, _user_id: &str) -> Result<Option<CustomerSubscription>> {
            Ok(self.subscription.clone())
        }

        async fn channel_usage(&self, _channel_id: i64, since: Option<i64>) -> Result<f64> {
            self.windows.lock().unwrap().push(since);
            Ok(self.usage)
        }
    }

    fn plans() -> Plans {
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

    #[test]
    fn test_is_premium_without_subscription() {
        assert!(!PlanLogic::is_premium(None));
    }

    #[tokio::test]
    async fn test_active_subscription_selects_premium() {
        let store = FixedStore::new(Some(SubscriptionStatus::Active), 0.0);
        let logic = PlanLogic::new(store, &plans(), "user-1", 7).await.unwrap();

        assert_eq!(logic.tier(), PlanTier::Premium);
        assert_eq!(logic.plan().name, "premium");
    }

    #[tokio::test]
    async fn test_canceled_subscription_selects_basic() {
        let store = FixedStore::new(Some(SubscriptionStatus::Canceled), 0.0);
        let logic = PlanLogic::new(store, &plans(), "user-1", 7).await.unwrap();

        assert_eq!(logic.tier(), PlanTier::Basic);
        assert_eq!(logic.plan().limit_duration, PlanLimitDuration::Lifetime);
    }

    #[tokio::test]
    async fn test_limit_is_inclusive() {
        let store = FixedStore::new(None, 1.0);
        let logic = PlanLogic::new(store, &plans(), "user-1", 7).await.unwrap();

        assert!(logic.is_plan_limit_reached().await.unwrap());
    }

    #[tokio::test]
    async fn test_daily_plan_queries_24_hour_window() {
        let store = FixedStore::new(Some(SubscriptionStatus::Trialing), 4.99);
        let logic = PlanLogic::new(store.clone(), &plans(), "user-1", 7).await.unwrap();
        let now = Utc::now();

        assert!(!logic.is_plan_limit_reached_at(now).await.unwrap());
        assert_eq!(
            store.windows.lock().unwrap().as_slice(),
            &[Some(now.timestamp() - 86_400)]
        );
    }

    #[tokio::test]
    async fn test_lifetime_plan_queries_without_window() {
        let store = FixedStore::new(None, 0.5);
        let logic = PlanLogic::new(store.clone(), &plans(), "user-1", 7).await.unwrap();

        let check = logic.check().await.unwrap();
        assert_eq!(check.window_start, None);
        assert_eq!(check.usage, 0.5);
        assert!(!check.limit_reached);
        assert_eq!(store.windows.lock().unwrap().as_slice(), &[None]);
    }
}
