//! Estimating backend for contractors: clients, per-trade pricing settings,
//! the estimate wizard and email delivery of finished estimates.

#[cfg(feature = "server")]
use std::sync::Arc;

#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::auth::TokenVerifier;
#[cfg(feature = "server")]
use crate::mailer::{EstimateMailer, build_mailer, email_templates};
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::DieselRepository;

#[cfg(feature = "server")]
pub mod auth;
#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod mailer;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "server")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod pricing;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "server")]
pub mod services;

/// Shared state handed to every worker.
#[cfg(feature = "server")]
#[derive(Clone)]
pub struct AppState {
    pub repo: DieselRepository,
    pub verifier: TokenVerifier,
    pub mailer: Arc<dyn EstimateMailer>,
    pub tera: Tera,
}

/// Registers application data and the `/api` scope.
#[cfg(feature = "server")]
pub fn configure_app(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(state.repo))
            .app_data(web::Data::new(state.verifier))
            .app_data(web::Data::from(state.mailer))
            .app_data(web::Data::new(state.tera))
            .service(web::scope("/api").configure(routes::configure));
    }
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Establish Diesel connection pool for the SQLite database.
    let pool = db::establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;
    db::run_migrations(&pool)
        .map_err(|e| std::io::Error::other(format!("Failed to migrate database: {e}")))?;

    let mailer = build_mailer(&server_config.mail)
        .map_err(|e| std::io::Error::other(format!("Failed to configure mailer: {e}")))?;

    let tera = email_templates()
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let state = AppState {
        repo: DieselRepository::new(pool),
        verifier: TokenVerifier::new(&server_config.jwt_secret),
        mailer,
        tera,
    };

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!("Listening on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .configure(configure_app(state.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
