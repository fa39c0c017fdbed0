//! Category handlers.

use actix_web::{HttpResponse, web};

use inforum_core::domain::{Category, NewCategory};
use inforum_shared::StatusMessage;
use inforum_shared::dto::{CategoryRequest, UpdateCategoryRequest};

use crate::middleware::auth::{AdminOnly, Authorized};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn category_not_found() -> AppError {
    AppError::NotFound("Category not found".to_string())
}

fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }
    Ok(())
}

/// GET /api/categories
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let categories = state.categories.find_all().await?;
    Ok(HttpResponse::Ok().json(categories))
}

/// GET /api/categories/{id}
pub async fn get(state: web::Data<AppState>, id: web::Path<i64>) -> AppResult<HttpResponse> {
    let category = state
        .categories
        .find_by_id(id.into_inner())
        .await?
        .ok_or_else(category_not_found)?;

    Ok(HttpResponse::Ok().json(category))
}

/// POST /api/categories
pub async fn create(
    state: web::Data<AppState>,
    _auth: Authorized<AdminOnly>,
    body: web::Json<CategoryRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    validate_name(&req.name)?;

    let category = state
        .categories
        .insert(NewCategory {
            name: req.name,
            description: req.description,
        })
        .await?;

    tracing::info!(category_id = category.id, "Category created");
    Ok(HttpResponse::Created().json(category))
}

/// PUT /api/categories/{id}
pub async fn update(
    state: web::Data<AppState>,
    _auth: Authorized<AdminOnly>,
    id: web::Path<i64>,
    body: web::Json<UpdateCategoryRequest>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    let req = body.into_inner();

    if req.id != id {
        return Err(AppError::BadRequest(
            "Check if the Category data is Valid or not.".to_string(),
        ));
    }
    validate_name(&req.name)?;

    let category = state
        .categories
        .update(Category {
            id,
            name: req.name,
            description: req.description,
        })
        .await
        .map_err(|e| match e {
            inforum_core::RepoError::NotFound => category_not_found(),
            other => other.into(),
        })?;

    Ok(HttpResponse::Ok().json(category))
}

/// DELETE /api/categories/{id}
///
/// Categories still referenced by posts are rejected with 409.
pub async fn delete(
    state: web::Data<AppState>,
    _auth: Authorized<AdminOnly>,
    id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();

    state.categories.delete(id).await.map_err(|e| match e {
        inforum_core::RepoError::NotFound => category_not_found(),
        other => other.into(),
    })?;

    tracing::info!(category_id = id, "Category deleted");
    Ok(HttpResponse::Ok().json(StatusMessage::ok("Category deleted Successfully.")))
}
