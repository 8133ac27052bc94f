//! HTTP handlers and route configuration.

mod chat;
mod health;
mod posts;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Chat proxy
            .route("/chat", web::post().to(chat::chat))
            // Blog routes. Fixed segments are registered before the slug
            // catch-all so /search and /tag/{tag} resolve first.
            .service(
                web::scope("/blogs")
                    .route("", web::get().to(posts::list))
                    .route("", web::post().to(posts::create))
                    .route("/search", web::get().to(posts::search))
                    .route("/tag/{tag}", web::get().to(posts::by_tag))
                    .route("/{slug}", web::get().to(posts::detail))
                    .route("/{slug}", web::put().to(posts::update))
                    .route("/{slug}", web::delete().to(posts::delete))
                    .route("/{slug}/related", web::get().to(posts::related))
                    .route("/{slug}/toc", web::get().to(posts::toc))
                    .route("/{slug}/structured", web::get().to(posts::structured)),
            ),
    );
}
