//! Home page content handlers.

use actix_web::{HttpResponse, web};

use inforum_core::RepoError;
use inforum_core::domain::{Home, NewHome};
use inforum_shared::StatusMessage;
use inforum_shared::dto::{HomeRequest, UpdateHomeRequest};

use crate::middleware::auth::{AdminOnly, Authorized};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn home_not_found(e: RepoError) -> AppError {
    match e {
        RepoError::NotFound => AppError::NotFound("Home content not found".to_string()),
        other => other.into(),
    }
}

/// GET /api/home
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.homes.find_all().await?))
}

/// GET /api/home/{id}
pub async fn get(state: web::Data<AppState>, id: web::Path<i64>) -> AppResult<HttpResponse> {
    let home = state
        .homes
        .find_by_id(id.into_inner())
        .await?
        .ok_or(RepoError::NotFound)
        .map_err(home_not_found)?;

    Ok(HttpResponse::Ok().json(home))
}

/// POST /api/home
pub async fn create(
    state: web::Data<AppState>,
    _auth: Authorized<AdminOnly>,
    body: web::Json<HomeRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    if req.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }

    let home = state
        .homes
        .insert(NewHome {
            title: req.title,
            description: req.description,
            image_url: req.image_url,
        })
        .await?;

    tracing::info!(home_id = home.id, "Home content created");
    Ok(HttpResponse::Created().json(home))
}

/// PUT /api/home/{id}
pub async fn update(
    state: web::Data<AppState>,
    _auth: Authorized<AdminOnly>,
    id: web::Path<i64>,
    body: web::Json<UpdateHomeRequest>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    let req = body.into_inner();

    if req.id != id {
        return Err(AppError::BadRequest(
            "Check if the Home data is Valid or not.".to_string(),
        ));
    }

    let home = state
        .homes
        .update(Home {
            id,
            title: req.title,
            description: req.description,
            image_url: req.image_url,
        })
        .await
        .map_err(home_not_found)?;

    Ok(HttpResponse::Ok().json(home))
}

/// DELETE /api/home/{id}
pub async fn delete(
    state: web::Data<AppState>,
    _auth: Authorized<AdminOnly>,
    id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    state
        .homes
        .delete(id.into_inner())
        .await
        .map_err(home_not_found)?;

    Ok(HttpResponse::Ok().json(StatusMessage::ok("Home content deleted Successfully.")))
}
