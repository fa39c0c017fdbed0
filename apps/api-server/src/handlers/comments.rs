//! Comment and reply handlers.

use actix_web::{HttpResponse, web};

use inforum_core::RepoError;
use inforum_core::domain::{Comment, NewComment, NewSubComment, SubComment};
use inforum_shared::StatusMessage;
use inforum_shared::dto::{
    CommentListParams, CreateCommentRequest, CreateSubCommentRequest, SubCommentListParams,
    UpdateCommentRequest,
};

use crate::middleware::auth::{AnyRole, Authorized};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn comment_not_found() -> AppError {
    AppError::NotFound("Comment not found".to_string())
}

fn reply_not_found() -> AppError {
    AppError::NotFound("Sub comment not found".to_string())
}

fn validate_body(content: &str) -> AppResult<()> {
    if content.trim().is_empty() {
        return Err(AppError::BadRequest("Content is required".to_string()));
    }
    Ok(())
}

async fn require_comment(state: &AppState, id: i64) -> AppResult<Comment> {
    state
        .comments
        .find_by_id(id)
        .await?
        .ok_or_else(comment_not_found)
}

async fn require_reply(state: &AppState, id: i64) -> AppResult<SubComment> {
    state
        .sub_comments
        .find_by_id(id)
        .await?
        .ok_or_else(reply_not_found)
}

/// GET /api/comments?blogPostId=
pub async fn list(
    state: web::Data<AppState>,
    params: web::Query<CommentListParams>,
) -> AppResult<HttpResponse> {
    let blog_post_id = params.blog_post_id;
    if state.posts.posts().find_by_id(blog_post_id).await?.is_none() {
        return Err(AppError::NotFound("Post not found".to_string()));
    }

    let comments = state.comments.find_by_post(blog_post_id).await?;
    Ok(HttpResponse::Ok().json(comments))
}

/// GET /api/comments/{id}
pub async fn get(state: web::Data<AppState>, id: web::Path<i64>) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(require_comment(&state, id.into_inner()).await?))
}

/// POST /api/comments
pub async fn create(
    state: web::Data<AppState>,
    auth: Authorized<AnyRole>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    validate_body(&req.content)?;

    if state.posts.posts().find_by_id(req.blog_post_id).await?.is_none() {
        return Err(AppError::NotFound("Post not found".to_string()));
    }

    let comment = state
        .comments
        .insert(NewComment {
            blog_post_id: req.blog_post_id,
            user_id: auth.user_id,
            content: req.content,
        })
        .await?;

    tracing::info!(comment_id = comment.id, post_id = comment.blog_post_id, "Comment created");
    Ok(HttpResponse::Created().json(comment))
}

/// PUT /api/comments/{id}
pub async fn update(
    state: web::Data<AppState>,
    auth: Authorized<AnyRole>,
    id: web::Path<i64>,
    body: web::Json<UpdateCommentRequest>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    let req = body.into_inner();

    if req.id != id {
        return Err(AppError::BadRequest(
            "Check if the Comment data is Valid or not.".to_string(),
        ));
    }
    validate_body(&req.content)?;

    let mut comment = require_comment(&state, id).await?;
    if !auth.can_modify(comment.user_id) {
        return Err(AppError::Forbidden);
    }

    comment.content = req.content;
    let comment = state.comments.update(comment).await.map_err(|e| match e {
        RepoError::NotFound => comment_not_found(),
        other => other.into(),
    })?;

    Ok(HttpResponse::Ok().json(comment))
}

/// DELETE /api/comments/{id}
///
/// Replies go first, then the comment.
pub async fn delete(
    state: web::Data<AppState>,
    auth: Authorized<AnyRole>,
    id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let comment = require_comment(&state, id.into_inner()).await?;
    if !auth.can_modify(comment.user_id) {
        return Err(AppError::Forbidden);
    }

    state
        .comments
        .delete_with_replies(comment.id)
        .await
        .map_err(|e| match e {
            RepoError::NotFound => comment_not_found(),
            other => other.into(),
        })?;

    tracing::info!(comment_id = comment.id, "Comment deleted");
    Ok(HttpResponse::Ok().json(StatusMessage::ok("Comment deleted Successfully.")))
}

/// GET /api/subcomments?commentId=
pub async fn list_replies(
    state: web::Data<AppState>,
    params: web::Query<SubCommentListParams>,
) -> AppResult<HttpResponse> {
    let comment = require_comment(&state, params.comment_id).await?;

    let replies = state.sub_comments.find_by_comment(comment.id).await?;
    Ok(HttpResponse::Ok().json(replies))
}

/// GET /api/subcomments/{id}
pub async fn get_reply(state: web::Data<AppState>, id: web::Path<i64>) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(require_reply(&state, id.into_inner()).await?))
}

/// POST /api/subcomments
pub async fn create_reply(
    state: web::Data<AppState>,
    auth: Authorized<AnyRole>,
    body: web::Json<CreateSubCommentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    validate_body(&req.content)?;

    let comment = require_comment(&state, req.comment_id).await?;

    let reply = state
        .sub_comments
        .insert(NewSubComment {
            comment_id: comment.id,
            user_id: auth.user_id,
            content: req.content,
        })
        .await?;

    tracing::info!(sub_comment_id = reply.id, comment_id = comment.id, "Sub comment created");
    Ok(HttpResponse::Created().json(reply))
}

/// PUT /api/subcomments/{id}
pub async fn update_reply(
    state: web::Data<AppState>,
    auth: Authorized<AnyRole>,
    id: web::Path<i64>,
    body: web::Json<UpdateCommentRequest>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    let req = body.into_inner();

    if req.id != id {
        return Err(AppError::BadRequest(
            "Check if the Sub Comment data is Valid or not.".to_string(),
        ));
    }
    validate_body(&req.content)?;

    let mut reply = require_reply(&state, id).await?;
    if !auth.can_modify(reply.user_id) {
        return Err(AppError::Forbidden);
    }

    reply.content = req.content;
    let reply = state.sub_comments.update(reply).await.map_err(|e| match e {
        RepoError::NotFound => reply_not_found(),
        other => other.into(),
    })?;

    Ok(HttpResponse::Ok().json(reply))
}

/// DELETE /api/subcomments/{id}
pub async fn delete_reply(
    state: web::Data<AppState>,
    auth: Authorized<AnyRole>,
    id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let reply = require_reply(&state, id.into_inner()).await?;
    if !auth.can_modify(reply.user_id) {
        return Err(AppError::Forbidden);
    }

    state
        .sub_comments
        .delete(reply.id)
        .await
        .map_err(|e| match e {
            RepoError::NotFound => reply_not_found(),
            other => other.into(),
        })?;

    Ok(HttpResponse::Ok().json(StatusMessage::ok("Sub comment deleted Successfully.")))
}
