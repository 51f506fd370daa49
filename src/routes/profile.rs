use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use crate::auth::CurrentStaff;
use crate::error::AppError;
use crate::models::{PasswordChangeRequest, StaffRecord};
use crate::routes::session::MessageResponse;
use crate::state::SharedState;
use crate::upload;

pub async fn change_password(
    State(state): State<SharedState>,
    CurrentStaff(staff): CurrentStaff,
    Json(mut req): Json<PasswordChangeRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    state.profiles.rotate_password(&staff, &mut req).await?;
    Ok(Json(MessageResponse {
        message: "Password changed successfully".to_string(),
    }))
}

pub async fn replace_photo(
    State(state): State<SharedState>,
    CurrentStaff(staff): CurrentStaff,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<StaffRecord>, AppError> {
    let photo = upload::parse_photo(&headers, body)
        .await
        .map_err(AppError::BadRequest)?;

    if photo
        .as_ref()
        .is_some_and(|p| p.bytes.len() > state.max_photo_size)
    {
        return Err(AppError::BadRequest(format!(
            "Photo must be at most {} bytes",
            state.max_photo_size
        )));
    }

    let updated = state.profiles.replace_photo(&staff, photo).await?;
    Ok(Json(updated))
}

pub async fn remove_photo(
    State(state): State<SharedState>,
    CurrentStaff(staff): CurrentStaff,
) -> Result<Json<StaffRecord>, AppError> {
    let updated = state.profiles.remove_photo(&staff).await?;
    Ok(Json(updated))
}
