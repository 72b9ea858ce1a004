use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post, put},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    constants::API_PREFIX,
    handlers::{amenities, auth, places, reviews, users},
    services::{HbnbFacade, JwtService},
    utils::Config,
};

/// Shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub facade: Arc<HbnbFacade>,
    pub jwt: Arc<JwtService>,
}

impl AppState {
    pub fn new(facade: HbnbFacade, jwt: JwtService) -> Self {
        Self {
            facade: Arc::new(facade),
            jwt: Arc::new(jwt),
        }
    }
}

pub fn create_router(state: AppState, config: &Config) -> Router {
    let cors_layer = create_cors_layer(config);

    let api = Router::new()
        // Auth
        .route("/auth/login", post(auth::login))
        .route("/auth/protected", get(auth::protected))
        .route("/auth/users/{id}", put(auth::admin_update_user))
        // Users
        .route("/users", post(users::create_user).get(users::list_users))
        .route("/users/", post(users::create_user).get(users::list_users))
        .route("/users/admin", post(users::create_admin_user))
        .route("/users/admin/", post(users::create_admin_user))
        .route("/users/check-admin", get(users::check_admin))
        .route("/users/check-admin/", get(users::check_admin))
        .route("/users/protected", get(users::protected))
        .route("/users/{id}", get(users::get_user).put(users::update_user))
        // Amenities
        .route("/amenities", post(amenities::create_amenity).get(amenities::list_amenities))
        .route("/amenities/", post(amenities::create_amenity).get(amenities::list_amenities))
        .route("/amenities/{id}", get(amenities::get_amenity).put(amenities::update_amenity))
        // Places
        .route("/places", post(places::create_place).get(places::list_places))
        .route("/places/", post(places::create_place).get(places::list_places))
        .route(
            "/places/{id}",
            get(places::get_place)
                .put(places::update_place)
                .delete(places::delete_place),
        )
        .route("/places/{id}/amenities", post(places::add_amenities))
        .route("/places/{id}/reviews", get(places::list_place_reviews))
        .route("/places/{id}/reviews/", get(places::list_place_reviews))
        // Reviews
        .route("/reviews", post(reviews::create_review).get(reviews::list_reviews))
        .route("/reviews/", post(reviews::create_review).get(reviews::list_reviews))
        .route(
            "/reviews/{id}",
            get(reviews::get_review)
                .put(reviews::update_review)
                .delete(reviews::delete_review),
        );

    Router::new()
        .route("/health", get(health_check))
        .nest(API_PREFIX, api)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

fn create_cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .allow_credentials(false);

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        // Default to permissive for development
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(origins)
    }
}

async fn health_check() -> &'static str {
    "OK"
}
