use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::Json,
};

use crate::{
    errors::{AppError, Result},
    handlers::AppState,
    models::{LimitCheck, LimitQuery, UserPlanResponse},
    services::plan_logic::PlanLogic,
};

pub async fn get_user_plan(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserPlanResponse>> {
    validate_user_id(&user_id)?;

    let (tier, plan) =
        PlanLogic::get_current_plan(state.store.as_ref(), &state.plans, &user_id).await?;

    Ok(Json(UserPlanResponse {
        user_id,
        tier,
        plan,
    }))
}

pub async fn check_limit(
    State(state): State<AppState>,
    query: std::result::Result<Query<LimitQuery>, QueryRejection>,
) -> Result<Json<LimitCheck>> {
    let Query(query) = query.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    validate_user_id(&query.user_id)?;

    let logic =
        PlanLogic::new(state.store.clone(), &state.plans, query.user_id, query.channel_id).await?;
    let check = logic.check().await?;

    Ok(Json(check))
}

/// Blank ids are rejected; anything else is looked up exactly as given.
fn validate_user_id(user_id: &str) -> Result<()> {
    if user_id.trim().is_empty() {
        return Err(AppError::Validation("user_id must not be empty".to_string()));
    }
    Ok(())
}
