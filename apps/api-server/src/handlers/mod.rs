//! HTTP handlers and route configuration.

mod blog_posts;
mod categories;
mod comments;
mod health;
mod home;

#[cfg(test)]
mod tests;

use actix_web::{error, web};

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Malformed bodies and query strings get the same envelope as every other failure.
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        error::Error::from(AppError::BadRequest(err.to_string()))
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        error::Error::from(AppError::BadRequest(err.to_string()))
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        error::Error::from(AppError::BadRequest(err.to_string()))
    }));

    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/blogposts")
                    .route("", web::get().to(blog_posts::list))
                    .route("", web::post().to(blog_posts::create))
                    .route("/star", web::post().to(blog_posts::toggle_star))
                    .route("/star/status", web::post().to(blog_posts::star_status))
                    .route("/slug/{slug}", web::get().to(blog_posts::get_by_slug))
                    .route("/{id}", web::get().to(blog_posts::get_by_id))
                    .route("/{id}", web::put().to(blog_posts::update))
                    .route("/{id}", web::delete().to(blog_posts::delete)),
            )
            .service(
                web::scope("/home")
                    .route("", web::get().to(home::list))
                    .route("", web::post().to(home::create))
                    .route("/{id}", web::get().to(home::get))
                    .route("/{id}", web::put().to(home::update))
                    .route("/{id}", web::delete().to(home::delete)),
            )
            .service(
                web::scope("/categories")
                    .route("", web::get().to(categories::list))
                    .route("", web::post().to(categories::create))
                    .route("/{id}", web::get().to(categories::get))
                    .route("/{id}", web::put().to(categories::update))
                    .route("/{id}", web::delete().to(categories::delete)),
            )
            .service(
                web::scope("/comments")
                    .route("", web::get().to(comments::list))
                    .route("", web::post().to(comments::create))
                    .route("/{id}", web::get().to(comments::get))
                    .route("/{id}", web::put().to(comments::update))
                    .route("/{id}", web::delete().to(comments::delete)),
            )
            .service(
                web::scope("/subcomments")
                    .route("", web::get().to(comments::list_replies))
                    .route("", web::post().to(comments::create_reply))
                    .route("/{id}", web::get().to(comments::get_reply))
                    .route("/{id}", web::put().to(comments::update_reply))
                    .route("/{id}", web::delete().to(comments::delete_reply)),
            ),
    );
}
