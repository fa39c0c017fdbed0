//! Blog post handlers, including the star toggle.

use actix_web::{HttpResponse, web};
use serde::Serialize;
use uuid::Uuid;

use inforum_core::domain::{BlogPost, PaginationMetadata, PostQuery, Star};
use inforum_core::services::PostContent;
use inforum_shared::dto::{
    BlogPostListParams, CreateBlogPostRequest, StarRequest, UpdateBlogPostRequest,
};
use inforum_shared::{StarStatusResponse, StarToggleResponse, StatusMessage};

use crate::middleware::auth::{AdminOnly, AnyRole, Authorized, EditorOrAdmin, Identity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const PAGINATION_HEADER: &str = "X-Pagination";

#[derive(Serialize)]
struct BlogPostPage {
    posts: Vec<BlogPost>,
    pagination: PaginationMetadata,
}

fn post_not_found() -> AppError {
    AppError::NotFound("Post not found".to_string())
}

/// GET /api/blogposts
pub async fn list(
    state: web::Data<AppState>,
    params: web::Query<BlogPostListParams>,
) -> AppResult<HttpResponse> {
    let params = params.into_inner();
    let query = PostQuery::new(
        params.user_id,
        params.star_sort,
        params.page_number,
        params.page_size,
    );

    let page = state.posts.posts().list(&query).await?;
    tracing::debug!(
        page = query.page_number,
        returned = page.items.len(),
        total = page.metadata.total_count,
        "Listed blog posts"
    );

    let header = serde_json::to_string(&page.metadata)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok()
        .insert_header((PAGINATION_HEADER, header))
        .json(BlogPostPage {
            posts: page.items,
            pagination: page.metadata,
        }))
}

/// GET /api/blogposts/{id}
pub async fn get_by_id(state: web::Data<AppState>, id: web::Path<i64>) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .posts()
        .find_by_id(id.into_inner())
        .await?
        .ok_or_else(post_not_found)?;

    Ok(HttpResponse::Ok().json(post))
}

/// GET /api/blogposts/slug/{slug}
pub async fn get_by_slug(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .posts()
        .find_by_slug(&slug)
        .await?
        .ok_or_else(post_not_found)?;

    Ok(HttpResponse::Ok().json(post))
}

/// POST /api/blogposts
pub async fn create(
    state: web::Data<AppState>,
    auth: Authorized<EditorOrAdmin>,
    body: web::Json<CreateBlogPostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let post = state
        .posts
        .create_post(
            auth.user_id,
            PostContent {
                title: req.title,
                excerpt: req.excerpt,
                content: req.content,
                category_id: req.category_id,
            },
        )
        .await?;

    Ok(HttpResponse::Created().json(post))
}

/// PUT /api/blogposts/{id}
pub async fn update(
    state: web::Data<AppState>,
    _auth: Authorized<EditorOrAdmin>,
    id: web::Path<i64>,
    body: web::Json<UpdateBlogPostRequest>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    let req = body.into_inner();

    if req.id != id {
        return Err(AppError::BadRequest(
            "Check if the Blog Post data is Valid or not.".to_string(),
        ));
    }

    let post = state
        .posts
        .update_post(
            id,
            PostContent {
                title: req.title,
                excerpt: req.excerpt,
                content: req.content,
                category_id: req.category_id,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/blogposts/{id}
pub async fn delete(
    state: web::Data<AppState>,
    _auth: Authorized<AdminOnly>,
    id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    state.posts.delete_post(id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(StatusMessage::ok("Post deleted Successfully.")))
}

/// The user a star request acts for. Only admins may act for someone else.
fn star_owner(identity: &Identity, requested: Option<Uuid>) -> AppResult<Uuid> {
    match requested {
        Some(user_id) if !identity.can_modify(user_id) => Err(AppError::Forbidden),
        Some(user_id) => Ok(user_id),
        None => Ok(identity.user_id),
    }
}

/// POST /api/blogposts/star
pub async fn toggle_star(
    state: web::Data<AppState>,
    auth: Authorized<AnyRole>,
    body: web::Json<StarRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let user_id = star_owner(&auth, req.user_id)?;

    let toggle = state
        .posts
        .toggle_star(Star::new(req.blog_post_id, user_id))
        .await?;

    Ok(HttpResponse::Ok().json(StarToggleResponse::new(toggle.added)))
}

/// POST /api/blogposts/star/status
pub async fn star_status(
    state: web::Data<AppState>,
    auth: Authorized<AnyRole>,
    body: web::Json<StarRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let user_id = star_owner(&auth, req.user_id)?;

    let star_exist = state
        .posts
        .star_status(Star::new(req.blog_post_id, user_id))
        .await?;

    Ok(HttpResponse::Ok().json(StarStatusResponse { star_exist }))
}
