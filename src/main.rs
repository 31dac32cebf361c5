use actix_cors::Cors;
use actix_web::{http::header, middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;

use tour_book::config::Config;
use tour_book::routes;
use tour_book::state::AppState;

fn cors(origin: Option<&str>) -> Cors {
    match origin {
        Some(origin) => Cors::default()
            .allowed_origin(origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE"])
            .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
            .expose_headers(vec![tour_book::handlers::DATA_SOURCE_HEADER])
            .max_age(3600),
        None => Cors::permissive(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger and environment
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::load().map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    if config.frontend_origin.is_none() {
        log::warn!("FRONTEND_ORIGIN not set, allowing any origin");
    }
    if config.jwt_secret.is_none() {
        log::info!("JWT_SECRET not set, admin checks will ask the booking API");
    }

    let bind = (config.host.clone(), config.port);
    let state = AppState::new(config).map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    log::info!(
        "Starting server at http://{}:{}, proxying {}",
        bind.0,
        bind.1,
        state.config.api_url
    );

    let state = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(cors(state.config.frontend_origin.as_deref()))
            .wrap(middleware::Logger::default())
            .configure(routes::configure)
    })
    .bind(bind)?
    .run()
    .await
}
