use axum::{extract::Extension, response::Json};

use crate::error::ApiError;
use crate::middleware::{require_role, AuthUser};
use crate::services::{StatsService, StatsSummary};
use crate::store::models::Role;
use crate::store::Store;

/// GET /admin-stats - Occupancy and revenue summary for the dashboard
pub async fn summary(
    Extension(store): Extension<Store>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<StatsSummary>, ApiError> {
    require_role(&store, &auth, Role::Admin).await?;

    let summary = StatsService::new(store).summarize().await?;
    Ok(Json(summary))
}
