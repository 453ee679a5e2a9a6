use crate::error::{ApiError, Context};
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use domains::Category;

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = state
        .categories
        .list_categories()
        .await
        .context("Failed to fetch categories")?;
    Ok(Json(categories))
}
