use axum::http::{header, HeaderValue, Method};
use axum::{routing::get, Router};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::api::handlers::{self as api_handlers, AppState};

/// Create the router with all endpoints
pub fn create_router(state: AppState) -> Router {
    // Read-only API, no authentication
    let api_routes = Router::new()
        .route("/search", get(api_handlers::search_recipes))
        .route("/recipes/:id", get(api_handlers::get_recipe))
        .route("/ingredients", get(api_handlers::list_ingredients))
        .route("/stats", get(api_handlers::get_stats))
        .with_state(state);

    let health_routes = Router::new().route("/health", get(api_handlers::health_check));

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .allow_origin(tower_http::cors::Any)
                .max_age(Duration::from_secs(3600)),
        )
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DataConfig, PaginationConfig, ServerConfig, Settings};
    use crate::indexer::{RawRecipeRow, RecipeIndex};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let row = RawRecipeRow {
            title: Some("Tomato Soup".to_string()),
            ingredients: Some(vec!["3 tomatoes".to_string()]),
            directions: Some(vec!["Simmer.".to_string()]),
            link: Some("example.com/soup".to_string()),
            ner: Some(vec!["tomatoes".to_string()]),
            total_time: Some("PT30M".to_string()),
            rating: Some(4.0),
            review_count: Some(2.0),
            ..Default::default()
        };
        let (index, report) = RecipeIndex::build(vec![row]).unwrap();

        AppState {
            index: Arc::new(index),
            report: Arc::new(report),
            settings: Settings {
                data: DataConfig {
                    path: "/tmp/recipes.jsonl".into(),
                    sample: false,
                    sample_seed: 42,
                },
                server: ServerConfig {
                    host: "127.0.0.1".to_string(),
                    port: 8080,
                },
                pagination: PaginationConfig {
                    default_page_size: 25,
                    max_page_size: 100,
                },
            },
        }
    }

    async fn status_of(uri: &str) -> StatusCode {
        let app = create_router(create_test_state());
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        response.status()
    }

    #[tokio::test]
    async fn test_routes_exist() {
        assert_eq!(status_of("/health").await, StatusCode::OK);
        assert_eq!(status_of("/api/stats").await, StatusCode::OK);
        assert_eq!(status_of("/api/ingredients").await, StatusCode::OK);
        assert_eq!(status_of("/api/recipes/0").await, StatusCode::OK);
        assert_eq!(
            status_of("/api/search?ingredients=tomato").await,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn test_error_statuses() {
        assert_eq!(status_of("/api/recipes/99").await, StatusCode::NOT_FOUND);
        assert_eq!(
            status_of("/api/search?page=5").await,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of("/api/search?duration=forever").await,
            StatusCode::BAD_REQUEST
        );
    }
}
