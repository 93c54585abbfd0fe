use anyhow::{bail, Result};
use std::env;

use crate::models::{PlanConfig, Plans};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub database_max_connections: u32,
    pub basic_plan: PlanConfig,
    pub premium_plan: PlanConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgresql://localhost/plan_limits".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()?,
            basic_plan: plan_from_env("BASIC_PLAN", "basic", "1.0", "lifetime")?,
            premium_plan: plan_from_env("PREMIUM_PLAN", "premium", "5.0", "daily")?,
        })
    }

    pub fn plans(&self) -> Plans {
        Plans {
            basic: self.basic_plan.clone(),
            premium: self.premium_plan.clone(),
        }
    }
}

fn plan_from_env(
    prefix: &str,
    default_name: &str,
    default_amount: &str,
    default_duration: &str,
) -> Result<PlanConfig> {
    let var = |suffix: &str, default: &str| {
        env::var(format!("{}_{}", prefix, suffix)).unwrap_or_else(|_| default.to_string())
    };

    let limit_amount: f64 = var("LIMIT_AMOUNT", default_amount).parse()?;
    if !limit_amount.is_finite() || limit_amount < 0.0 {
        bail!("{}_LIMIT_AMOUNT must be a non-negative number, got {}", prefix, limit_amount);
    }

    Ok(PlanConfig {
        name: var("NAME", default_name),
        limit_amount,
        limit_duration: var("LIMIT_DURATION", default_duration).parse()?,
    })
}
