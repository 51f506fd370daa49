use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::CurrentStaff;
use crate::error::AppError;
use crate::models::StaffRecord;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<StaffRecord>, AppError> {
    let staff = state.profiles.login(&req.email, &req.password).await?;
    Ok(Json(staff))
}

pub async fn current(CurrentStaff(staff): CurrentStaff) -> Json<StaffRecord> {
    Json(staff)
}

pub async fn refresh(
    State(state): State<SharedState>,
    CurrentStaff(staff): CurrentStaff,
) -> Result<Json<StaffRecord>, AppError> {
    let fresh = state.profiles.refresh(&staff).await?;
    Ok(Json(fresh))
}

pub async fn logout(State(state): State<SharedState>) -> Result<Json<MessageResponse>, AppError> {
    state.profiles.logout().await?;
    Ok(Json(MessageResponse {
        message: "Logged out successfully".to_string(),
    }))
}
