// API Integration Tests
//
// Purpose: Exercise every endpoint against the bundled data directory
// Run with: cargo test --features api --test api_integration_tests

#[cfg(feature = "api")]
mod api_tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use humanmachine_catalog::{create_router, AppState, CatalogConfig};
    use serde_json::Value;
    use std::path::Path;
    use tower::ServiceExt; // for oneshot

    // Helper: Create test app over data/
    fn create_test_app() -> axum::Router {
        let config = CatalogConfig {
            data_dir: Path::new(env!("CARGO_MANIFEST_DIR")).join("data"),
            ..CatalogConfig::default()
        };
        let state = AppState::load(config).expect("bundled data should load");
        create_router(state)
    }

    async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        (status, serde_json::from_slice(&body).expect("Failed to parse JSON"))
    }

    // =========================================================================
    // Section 1: Health Check
    // =========================================================================

    #[tokio::test]
    async fn test_health_check() {
        let (status, body) = get(create_test_app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].is_string());
    }

    // =========================================================================
    // Section 2: List and home pages
    // =========================================================================

    #[tokio::test]
    async fn test_interviews_list_newest_first() {
        let (status, body) = get(create_test_app(), "/api/interviews").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["meta"]["title"], "Interviews | Human Machine");

        let items = body["items"].as_array().unwrap();
        assert_eq!(items.len(), 4);
        assert_eq!(items[0]["href"], "/interviews/battery-passports-in-practice");
        assert_eq!(items[0]["date_label"], "November 5, 2025");
        assert_eq!(items[1]["href"], "/interviews/wallets-people-trust");
    }

    #[tokio::test]
    async fn test_list_filters_from_query() {
        let (status, body) =
            get(create_test_app(), "/api/interviews?category=Product%20Passports&limit=1").await;
        assert_eq!(status, StatusCode::OK);

        let items = body["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["category"], "Product Passports");

        let (_, body) = get(create_test_app(), "/api/work?featured=true&since=2025-01-01").await;
        let items = body["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["project"], "Battery Passport Platform");
    }

    #[tokio::test]
    async fn test_home_rails() {
        let (status, body) = get(create_test_app(), "/api/home").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["latest_interviews"]["items"].as_array().unwrap().len(), 3);
        assert_eq!(body["latest_work"]["items"].as_array().unwrap().len(), 2);
        assert_eq!(body["latest_play"]["items"][0]["title"], "Passport Schema Kit");
    }

    // =========================================================================
    // Section 3: Detail pages
    // =========================================================================

    #[tokio::test]
    async fn test_work_detail() {
        let app = create_test_app();
        let (status, body) = get(app.clone(), "/api/work/battery-passport-platform").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["meta"]["title"], "Battery Passport Platform | Human Machine");
        assert_eq!(body["meta"]["og_title"], "Battery Passport Platform - Voltcycle");
        assert_eq!(body["related"].as_array().unwrap().len(), 2);

        // Second request is served from cache and must be identical
        let (_, cached) = get(app, "/api/work/battery-passport-platform").await;
        assert_eq!(cached, body);
    }

    #[tokio::test]
    async fn test_interview_detail_media() {
        let (status, body) = get(create_test_app(), "/api/interviews/wallets-people-trust").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["media"]["kind"], "audio");
        assert_eq!(body["guest_line"], "Design Director at Keyring Labs");
    }

    #[tokio::test]
    async fn test_unknown_slug_is_404() {
        let (status, body) = get(create_test_app(), "/api/play/nonexistent").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("nonexistent"));
        assert_eq!(body["page"]["meta"]["title"], "Project Not Found");
        assert_eq!(body["page"]["status"], 404);
    }

    // =========================================================================
    // Section 4: Routes
    // =========================================================================

    #[tokio::test]
    async fn test_static_routes() {
        let (status, body) = get(create_test_app(), "/api/routes").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 14);
        assert_eq!(body["routes"][0], "/");
    }

    #[tokio::test]
    async fn test_resolve() {
        let (status, body) = get(create_test_app(), "/api/resolve?path=/play/qr-carrier-lab").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["route"], "/play/qr-carrier-lab");
        assert_eq!(body["kind"], "play");

        let (status, body) = get(create_test_app(), "/api/resolve?path=/blog").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["page"]["meta"]["title"], "Page Not Found");
    }
}
