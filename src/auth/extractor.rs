use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::models::StaffRecord;
use crate::state::SharedState;

/// The staff member held in the session cache.
#[derive(Debug, Clone)]
pub struct CurrentStaff(pub StaffRecord);

impl FromRequestParts<SharedState> for CurrentStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        state
            .profiles
            .current()
            .await
            .map(CurrentStaff)
            .ok_or_else(|| AppError::Unauthorized("Not logged in".to_string()))
    }
}
