use crate::{models::Plans, services::store::UsageStore};
use std::sync::Arc;

pub mod health;
pub mod plan;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UsageStore>,
    pub plans: Arc<Plans>,
}

impl AppState {
    pub fn new(store: Arc<dyn UsageStore>, plans: Plans) -> Self {
        Self {
            store,
            plans: Arc::new(plans),
        }
    }
}
