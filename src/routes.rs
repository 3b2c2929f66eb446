// src/routes.rs

use axum::{Router, http::Method, middleware, routing::{get, post}};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{catalog, practice, profile, ranking, statistics},
    state::AppState,
    utils::jwt::auth_middleware,
};

/// Assembles the main application router.
///
/// * Catalog listings are public; everything user-scoped sits behind the
///   bearer-token middleware.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (store, config, facet cache).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let catalog_routes = Router::new().route("/{dimension}", get(catalog::list_facet_values));

    let practice_routes = Router::new()
        .route("/questions", get(practice::list_questions))
        .route("/answers", post(practice::submit_answer));

    let statistics_routes = Router::new()
        .route("/summary", get(statistics::summary))
        .route("/subjects", get(statistics::by_subject))
        .route("/subjects/{subject_id}/topics", get(statistics::by_topic))
        .route("/weaknesses", get(statistics::weaknesses))
        .route("/daily", get(statistics::daily));

    let protected = Router::new()
        .nest("/api/practice", practice_routes)
        .nest("/api/statistics", statistics_routes)
        .route("/api/ranking", get(ranking::leaderboard))
        .route("/api/profile/me", get(profile::get_me))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .nest("/api/catalog", catalog_routes)
        .merge(protected)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
