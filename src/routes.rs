use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::AppState;

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = std::iter::once(&state.config.frontend_url)
        .chain(state.config.cors_extra_origins.iter())
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(hv) => Some(hv),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        .route("/ws", get(handlers::ws::ws_handler));

    let api_routes = Router::new()
        // Moods & users
        .route("/api/moods", get(handlers::moods::list_moods))
        .route("/api/users", get(handlers::users::list_users))
        .route("/api/users/by-email", get(handlers::users::find_user_by_email))
        .route("/api/users/:id", get(handlers::users::get_user))
        // Entries
        .route(
            "/api/entries",
            get(handlers::entries::list_entries).post(handlers::entries::create_entry),
        )
        .route("/api/entries/colors", get(handlers::entries::list_colors))
        .route("/api/entries/:id", get(handlers::entries::get_entry))
        // Calendar
        .route("/api/calendar/day/:date", get(handlers::calendar::get_day))
        .route("/api/calendar/:year/:month", get(handlers::calendar::get_month))
        // Stats
        .route("/api/stats", get(handlers::stats::get_stats))
        .route("/api/stats/colors", get(handlers::stats::get_color_distribution))
        .route("/api/stats/time-of-day", get(handlers::stats::get_time_of_day))
        .route("/api/stats/weekly-trend", get(handlers::stats::get_weekly_trend))
        .route("/api/stats/streak", get(handlers::stats::get_streak))
        .route("/api/stats/top-icon", get(handlers::stats::get_top_icon));

    let cors = cors_layer(&state);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
