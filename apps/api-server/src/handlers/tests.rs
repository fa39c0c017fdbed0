use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::middleware::from_fn;
use actix_web::{App, test, web};
use serde_json::{Value, json};
use uuid::Uuid;

use inforum_core::domain::Role;
use inforum_core::ports::TokenService;
use inforum_infra::{JwtConfig, JwtTokenService};

use super::configure_routes;
use crate::observability::request_id_middleware;
use crate::state::AppState;

macro_rules! test_app {
    ($state:expr, $tokens:expr) => {
        test::init_service(
            App::new()
                .wrap(from_fn(request_id_middleware))
                .app_data(web::Data::new($state.clone()))
                .app_data(web::Data::new($tokens.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

fn token_service() -> Arc<dyn TokenService> {
    Arc::new(JwtTokenService::new(JwtConfig {
        secret: "handler-test-secret".to_string(),
        expiration_hours: 1,
        issuer: "inforum-api".to_string(),
    }))
}

/// A fresh caller holding `roles`, with its bearer header value.
fn caller(tokens: &Arc<dyn TokenService>, roles: &[Role]) -> (Uuid, String) {
    let user_id = Uuid::new_v4();
    let token = tokens
        .generate_token(user_id, "someone@example.com", roles)
        .unwrap();
    (user_id, format!("Bearer {token}"))
}

#[actix_rt::test]
async fn test_health_reports_storage_and_request_id() {
    let (state, tokens) = (AppState::in_memory(), token_service());
    let app = test_app!(state, tokens);

    let req = test::TestRequest::get()
        .uri("/api/health")
        .insert_header(("X-Request-ID", "req-123"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "req-123");
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
    assert_eq!(body["requestId"], "req-123");
}

#[actix_rt::test]
async fn test_create_post_requires_editor_or_admin() {
    let (state, tokens) = (AppState::in_memory(), token_service());
    let app = test_app!(state, tokens);
    let payload = json!({"title": "Hello, World!", "content": "Body"});

    let req = test::TestRequest::post()
        .uri("/api/blogposts")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 401);

    let (_, reader) = caller(&tokens, &[Role::User]);
    let req = test::TestRequest::post()
        .uri("/api/blogposts")
        .insert_header(("Authorization", reader))
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let (editor_id, editor) = caller(&tokens, &[Role::Editor]);
    let req = test::TestRequest::post()
        .uri("/api/blogposts")
        .insert_header(("Authorization", editor))
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["slug"], "hello-world-1");
    assert_eq!(body["star"], 0);
    assert_eq!(body["authorId"], editor_id.to_string());
}

#[actix_rt::test]
async fn test_invalid_token_rejected() {
    let (state, tokens) = (AppState::in_memory(), token_service());
    let app = test_app!(state, tokens);

    let req = test::TestRequest::post()
        .uri("/api/blogposts/star")
        .insert_header(("Authorization", "Bearer not-a-token"))
        .set_json(json!({"blogPostId": 1}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_get_post_by_id_and_slug() {
    let (state, tokens) = (AppState::in_memory(), token_service());
    let app = test_app!(state, tokens);
    let (_, editor) = caller(&tokens, &[Role::Editor]);

    let req = test::TestRequest::post()
        .uri("/api/blogposts")
        .insert_header(("Authorization", editor))
        .set_json(json!({"title": "Rust Tips", "content": "Body"}))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/api/blogposts/slug/rust-tips-1")
        .to_request();
    let by_slug: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(by_slug["id"], created["id"]);

    let req = test::TestRequest::get().uri("/api/blogposts/99").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"status": 404, "message": "Post not found"}));
}

#[actix_rt::test]
async fn test_list_returns_pagination_header() {
    let (state, tokens) = (AppState::in_memory(), token_service());
    let app = test_app!(state, tokens);
    let (_, editor) = caller(&tokens, &[Role::Editor]);

    for n in 0..3 {
        let req = test::TestRequest::post()
            .uri("/api/blogposts")
            .insert_header(("Authorization", editor.clone()))
            .set_json(json!({"title": format!("Post {n}"), "content": "Body"}))
            .to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::get()
        .uri("/api/blogposts?pageNumber=2&pageSize=2")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let header: Value =
        serde_json::from_str(resp.headers().get("X-Pagination").unwrap().to_str().unwrap())
            .unwrap();
    assert_eq!(header["totalCount"], 3);
    assert_eq!(header["totalPages"], 2);
    assert_eq!(header["hasPrevious"], true);
    assert_eq!(header["hasNext"], false);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["posts"].as_array().unwrap().len(), 1);
    assert_eq!(body["pagination"], header);
}

#[actix_rt::test]
async fn test_list_past_last_page_is_empty() {
    let (state, tokens) = (AppState::in_memory(), token_service());
    let app = test_app!(state, tokens);
    let (_, editor) = caller(&tokens, &[Role::Editor]);

    let req = test::TestRequest::post()
        .uri("/api/blogposts")
        .insert_header(("Authorization", editor))
        .set_json(json!({"title": "Only post", "content": "Body"}))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/api/blogposts?pageNumber=18446744073709551615&pageSize=50")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["posts"], json!([]));
    assert_eq!(body["pagination"]["totalCount"], 1);
    assert_eq!(body["pagination"]["hasNext"], false);
}

#[actix_rt::test]
async fn test_update_post_checks_route_id() {
    let (state, tokens) = (AppState::in_memory(), token_service());
    let app = test_app!(state, tokens);
    let (_, editor) = caller(&tokens, &[Role::Editor]);

    let req = test::TestRequest::post()
        .uri("/api/blogposts")
        .insert_header(("Authorization", editor.clone()))
        .set_json(json!({"title": "Draft", "content": "Body"}))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::put()
        .uri("/api/blogposts/1")
        .insert_header(("Authorization", editor.clone()))
        .set_json(json!({"id": 2, "title": "Final", "content": "Body"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Check if the Blog Post data is Valid or not.");

    let req = test::TestRequest::put()
        .uri("/api/blogposts/1")
        .insert_header(("Authorization", editor.clone()))
        .set_json(json!({"id": 1, "title": "Final Cut", "content": "Body"}))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["slug"], "final-cut-1");

    let req = test::TestRequest::put()
        .uri("/api/blogposts/7")
        .insert_header(("Authorization", editor))
        .set_json(json!({"id": 7, "title": "Ghost", "content": "Body"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_update_post_response_carries_category() {
    let (state, tokens) = (AppState::in_memory(), token_service());
    let app = test_app!(state, tokens);
    let (_, admin) = caller(&tokens, &[Role::Admin]);

    let req = test::TestRequest::post()
        .uri("/api/categories")
        .insert_header(("Authorization", admin.clone()))
        .set_json(json!({"name": "Rust"}))
        .to_request();
    let category: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/blogposts")
        .insert_header(("Authorization", admin.clone()))
        .set_json(json!({"title": "Untyped", "content": "Body"}))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::put()
        .uri("/api/blogposts/1")
        .insert_header(("Authorization", admin))
        .set_json(json!({
            "id": 1,
            "title": "Typed",
            "content": "Body",
            "categoryId": category["id"]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let updated: Value = test::read_body_json(resp).await;
    assert_eq!(updated["categoryId"], category["id"]);
    assert_eq!(updated["category"]["name"], "Rust");
}

#[actix_rt::test]
async fn test_blank_post_fields_rejected() {
    let (state, tokens) = (AppState::in_memory(), token_service());
    let app = test_app!(state, tokens);
    let (_, editor) = caller(&tokens, &[Role::Editor]);

    let req = test::TestRequest::post()
        .uri("/api/blogposts")
        .insert_header(("Authorization", editor.clone()))
        .set_json(json!({"title": "  ", "content": "Body"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"status": 400, "message": "Title is required"}));

    let req = test::TestRequest::post()
        .uri("/api/blogposts")
        .insert_header(("Authorization", editor))
        .set_json(json!({"title": "Empty", "content": ""}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Content is required");
}

#[actix_rt::test]
async fn test_malformed_body_uses_envelope() {
    let (state, tokens) = (AppState::in_memory(), token_service());
    let app = test_app!(state, tokens);
    let (_, editor) = caller(&tokens, &[Role::Editor]);

    let req = test::TestRequest::post()
        .uri("/api/blogposts")
        .insert_header(("Authorization", editor))
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 400);
}

#[actix_rt::test]
async fn test_star_toggle_and_status() {
    let (state, tokens) = (AppState::in_memory(), token_service());
    let app = test_app!(state, tokens);
    let (_, editor) = caller(&tokens, &[Role::Editor]);
    let (reader_id, reader) = caller(&tokens, &[Role::User]);

    let req = test::TestRequest::post()
        .uri("/api/blogposts")
        .insert_header(("Authorization", editor))
        .set_json(json!({"title": "Star me", "content": "Body"}))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/blogposts/star")
        .insert_header(("Authorization", reader.clone()))
        .set_json(json!({"blogPostId": 1}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["added"], true);
    assert_eq!(body["message"], "Star added Successfully.");

    let req = test::TestRequest::post()
        .uri("/api/blogposts/star/status")
        .insert_header(("Authorization", reader.clone()))
        .set_json(json!({"blogPostId": 1, "userId": reader_id}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({"starExist": true}));

    let req = test::TestRequest::get().uri("/api/blogposts/1").to_request();
    let post: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(post["star"], 1);

    let req = test::TestRequest::post()
        .uri("/api/blogposts/star")
        .insert_header(("Authorization", reader.clone()))
        .set_json(json!({"blogPostId": 1}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["added"], false);
    assert_eq!(body["message"], "Star removed Successfully.");

    let req = test::TestRequest::post()
        .uri("/api/blogposts/star")
        .insert_header(("Authorization", reader))
        .set_json(json!({"blogPostId": 42}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_star_for_another_user_requires_admin() {
    let (state, tokens) = (AppState::in_memory(), token_service());
    let app = test_app!(state, tokens);
    let (_, editor) = caller(&tokens, &[Role::Editor]);
    let (_, reader) = caller(&tokens, &[Role::User]);
    let (_, admin) = caller(&tokens, &[Role::Admin]);
    let someone_else = Uuid::new_v4();

    let req = test::TestRequest::post()
        .uri("/api/blogposts")
        .insert_header(("Authorization", editor))
        .set_json(json!({"title": "Shared", "content": "Body"}))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/blogposts/star")
        .insert_header(("Authorization", reader))
        .set_json(json!({"blogPostId": 1, "userId": someone_else}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/blogposts/star")
        .insert_header(("Authorization", admin))
        .set_json(json!({"blogPostId": 1, "userId": someone_else}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_delete_post_cascades_to_comments() {
    let (state, tokens) = (AppState::in_memory(), token_service());
    let app = test_app!(state, tokens);
    let (_, editor) = caller(&tokens, &[Role::Editor]);
    let (_, reader) = caller(&tokens, &[Role::User]);
    let (_, admin) = caller(&tokens, &[Role::Admin]);

    let req = test::TestRequest::post()
        .uri("/api/blogposts")
        .insert_header(("Authorization", editor.clone()))
        .set_json(json!({"title": "Busy thread", "content": "Body"}))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/comments")
        .insert_header(("Authorization", reader.clone()))
        .set_json(json!({"blogPostId": 1, "content": "First!"}))
        .to_request();
    let comment: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/subcomments")
        .insert_header(("Authorization", reader.clone()))
        .set_json(json!({"commentId": comment["id"], "content": "Agreed"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/blogposts/star")
        .insert_header(("Authorization", reader))
        .set_json(json!({"blogPostId": 1}))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::delete()
        .uri("/api/blogposts/1")
        .insert_header(("Authorization", editor))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri("/api/blogposts/1")
        .insert_header(("Authorization", admin.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/comments/{}", comment["id"]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri("/api/blogposts/1")
        .insert_header(("Authorization", admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_comment_ownership() {
    let (state, tokens) = (AppState::in_memory(), token_service());
    let app = test_app!(state, tokens);
    let (_, editor) = caller(&tokens, &[Role::Editor]);
    let (_, author) = caller(&tokens, &[Role::User]);
    let (_, stranger) = caller(&tokens, &[Role::User]);

    let req = test::TestRequest::post()
        .uri("/api/comments")
        .insert_header(("Authorization", author.clone()))
        .set_json(json!({"blogPostId": 1, "content": "Too early"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/api/blogposts")
        .insert_header(("Authorization", editor))
        .set_json(json!({"title": "Discuss", "content": "Body"}))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/comments")
        .insert_header(("Authorization", author.clone()))
        .set_json(json!({"blogPostId": 1, "content": "Mine"}))
        .to_request();
    let comment: Value = test::call_and_read_body_json(&app, req).await;
    let uri = format!("/api/comments/{}", comment["id"]);

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(("Authorization", stranger.clone()))
        .set_json(json!({"id": comment["id"], "content": "Hijacked"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(("Authorization", author.clone()))
        .set_json(json!({"id": comment["id"], "content": "Edited"}))
        .to_request();
    let edited: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(edited["content"], "Edited");

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(("Authorization", stranger))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(("Authorization", author))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/comments?blogPostId=1")
        .to_request();
    let remaining: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(remaining, json!([]));
}

#[actix_rt::test]
async fn test_referenced_category_delete_conflicts() {
    let (state, tokens) = (AppState::in_memory(), token_service());
    let app = test_app!(state, tokens);
    let (_, admin) = caller(&tokens, &[Role::Admin]);

    let req = test::TestRequest::post()
        .uri("/api/categories")
        .insert_header(("Authorization", admin.clone()))
        .set_json(json!({"name": "Rust"}))
        .to_request();
    let category: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/blogposts")
        .insert_header(("Authorization", admin.clone()))
        .set_json(json!({"title": "Typed", "content": "Body", "categoryId": category["id"]}))
        .to_request();
    let post: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(post["categoryId"], category["id"]);

    let req = test::TestRequest::get().uri("/api/blogposts/1").to_request();
    let loaded: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(loaded["category"]["name"], "Rust");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/categories/{}", category["id"]))
        .insert_header(("Authorization", admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 409);
}

#[actix_rt::test]
async fn test_home_crud_is_admin_only() {
    let (state, tokens) = (AppState::in_memory(), token_service());
    let app = test_app!(state, tokens);
    let (_, editor) = caller(&tokens, &[Role::Editor]);
    let (_, admin) = caller(&tokens, &[Role::Admin]);
    let payload = json!({"title": "Welcome", "description": "Hero text"});

    let req = test::TestRequest::post()
        .uri("/api/home")
        .insert_header(("Authorization", editor))
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/home")
        .insert_header(("Authorization", admin.clone()))
        .set_json(&payload)
        .to_request();
    let home: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/home/{}", home["id"]))
        .insert_header(("Authorization", admin))
        .set_json(json!({
            "id": home["id"],
            "title": "Welcome back",
            "description": "Hero text",
            "imageUrl": "/img/hero.png"
        }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["imageUrl"], "/img/hero.png");

    let req = test::TestRequest::get().uri("/api/home").to_request();
    let all: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}
