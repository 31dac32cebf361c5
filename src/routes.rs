use actix_web::{error, web, HttpRequest};

use crate::error::AppError;
use crate::handlers;

/// Malformed JSON bodies answer with the same `{"error": ...}` shape as
/// every other failure.
fn json_error(err: error::JsonPayloadError, _req: &HttpRequest) -> error::Error {
    AppError::BadRequest(err.to_string()).into()
}

fn query_error(err: error::QueryPayloadError, _req: &HttpRequest) -> error::Error {
    AppError::BadRequest(err.to_string()).into()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .route("/health", web::get().to(handlers::health::health))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(handlers::auth::register))
                        .route("/login", web::post().to(handlers::auth::login))
                        .route("/logout", web::post().to(handlers::auth::logout))
                        .route("/me", web::get().to(handlers::auth::me)),
                )
                .route("/profile", web::put().to(handlers::auth::update_profile))
                .service(
                    web::scope("/hotels")
                        .route("", web::get().to(handlers::hotels::list_hotels))
                        .route("/{id}", web::get().to(handlers::hotels::get_hotel))
                        .route("/{id}/reviews", web::get().to(handlers::hotels::hotel_reviews)),
                )
                .service(
                    web::scope("/yachts")
                        .route("", web::get().to(handlers::yachts::list_yachts))
                        .route("/{id}", web::get().to(handlers::yachts::get_yacht))
                        .route("/{id}/reviews", web::get().to(handlers::yachts::yacht_reviews)),
                )
                .service(
                    web::scope("/bookings")
                        .route("", web::get().to(handlers::bookings::get_user_bookings))
                        .route("", web::post().to(handlers::bookings::create_booking))
                        .route("/quote", web::post().to(handlers::bookings::quote_booking))
                        .route("/{id}/cancel", web::post().to(handlers::bookings::cancel_booking)),
                )
                .route("/reviews", web::post().to(handlers::reviews::create_review))
                .service(
                    web::scope("/admin")
                        .route("/stats", web::get().to(handlers::admin::stats))
                        .route("/hotels", web::get().to(handlers::admin::list_hotels))
                        .route("/hotels", web::post().to(handlers::admin::create_hotel))
                        .route("/hotels/{id}", web::put().to(handlers::admin::update_hotel))
                        .route("/hotels/{id}", web::delete().to(handlers::admin::delete_hotel))
                        .route("/yachts", web::get().to(handlers::admin::list_yachts))
                        .route("/yachts", web::post().to(handlers::admin::create_yacht))
                        .route("/yachts/{id}", web::put().to(handlers::admin::update_yacht))
                        .route("/yachts/{id}", web::delete().to(handlers::admin::delete_yacht))
                        .route("/bookings", web::get().to(handlers::admin::list_bookings))
                        .route(
                            "/bookings/{id}/status",
                            web::put().to(handlers::admin::update_booking_status),
                        )
                        .route("/bookings/{id}", web::delete().to(handlers::admin::delete_booking))
                        .route("/users", web::get().to(handlers::admin::list_users))
                        .route("/users/{id}", web::put().to(handlers::admin::update_user))
                        .route("/users/{id}", web::delete().to(handlers::admin::delete_user))
                        .route("/reviews", web::get().to(handlers::admin::list_reviews))
                        .route("/reviews/{id}", web::delete().to(handlers::admin::delete_review)),
                ),
        );
}
