use axum::{routing::{get, post}, Router};
use crate::controllers::sizing_controller::{
    compute_layout, compute_performance, compute_sizing, get_defaults, get_health,
};
use crate::shared_state::AppState;

/// Build the `/api/*` sub-router.
pub fn sizing_routes(state: AppState) -> Router {
    Router::new()
        .route("/sizing",              post(compute_sizing))
        .route("/sizing/performance",  post(compute_performance))
        .route("/sizing/layout",       post(compute_layout))
        .route("/sizing/defaults",     get(get_defaults))
        .route("/health",              get(get_health))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::models::sizing::SizingDefaults;

    fn app() -> Router {
        Router::new().nest("/api", sizing_routes(AppState::new(SizingDefaults::default())))
    }

    async fn send(method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(b) => builder
                .header("content-type", "application/json")
                .body(Body::from(b.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let res = app().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn module() -> Value {
        json!({
            "length_m": 1.7, "width_m": 1.1, "rated_power_w": 550.0,
            "isc_stc_a": 13.0, "isc_max_inv_a": 15.0
        })
    }

    fn derating() -> Value {
        json!({
            "temp_coef_pct_per_c": -0.35, "module_temp_c": 45.0, "ref_temp_c": 25.0,
            "mismatch": 0.98, "soiling": 0.97, "degradation": 0.99, "shading": 0.98,
            "cable_eff": 0.98, "inverter_eff": 0.96, "peak_sun_hours": 5.0
        })
    }

    #[tokio::test]
    async fn test_performance_endpoint() {
        let (status, body) = send(
            "POST",
            "/api/sizing/performance",
            Some(json!({ "module": module(), "derating": derating() })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let area = body["panel_area_m2"].as_f64().unwrap();
        assert!((area - 1.87).abs() < 1e-9);
        let wh = body["yearly_energy_wh_per_m2"].as_f64().unwrap();
        let kwh = body["yearly_energy_kwh_per_m2"].as_f64().unwrap();
        assert!((wh / 1000.0 - kwh).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_zero_width_module_is_unprocessable() {
        let mut m = module();
        m["width_m"] = json!(0.0);
        let (status, body) = send(
            "POST",
            "/api/sizing/performance",
            Some(json!({ "module": m, "derating": derating() })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "InvalidGeometry");
    }

    #[tokio::test]
    async fn test_layout_endpoint() {
        let (status, body) = send(
            "POST",
            "/api/sizing/layout",
            Some(json!({
                "module_width_m": 1.1, "module_length_m": 1.7, "gap_m": 0.02,
                "site_width_m": 20.0, "site_length_m": 30.0, "orientation": "Landscape"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["modules_up"], 17);
        assert_eq!(body["modules_across"], 17);
        assert_eq!(body["modules_total"], 289);
    }

    #[tokio::test]
    async fn test_zero_footprint_is_unprocessable() {
        let (status, body) = send(
            "POST",
            "/api/sizing/layout",
            Some(json!({
                "module_width_m": 0.0, "module_length_m": 1.7, "gap_m": 0.0,
                "site_width_m": 20.0, "site_length_m": 30.0, "orientation": "Portrait"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "InvalidGeometry");
    }

    #[tokio::test]
    async fn test_full_report_inherits_footprint() {
        let (status, body) = send(
            "POST",
            "/api/sizing",
            Some(json!({
                "module": module(),
                "derating": derating(),
                "layout": { "gap_m": 0.02, "site_width_m": 20.0, "site_length_m": 30.0,
                            "orientation": "Portrait" }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["layout"]["module_width_m"], 1.1);
        assert_eq!(body["placement"]["modules_total"], 286);
        assert_eq!(body["module"]["isc_max_inv_a"], 15.0);
    }

    #[tokio::test]
    async fn test_defaults_and_health() {
        let (status, body) = send("GET", "/api/sizing/defaults", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["layout"]["site_width_m"], 20.0);
        assert_eq!(body["layout"]["orientation"], "Landscape");

        let (status, body) = send("GET", "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_malformed_body_never_reaches_calculator() {
        let (status, _) = send("POST", "/api/sizing/layout", Some(json!({ "gap_m": 0.02 }))).await;
        assert!(status.is_client_error());
    }
}
