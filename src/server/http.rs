use anyhow::Result;
use serde_json::Value;
use warp::{Filter, Rejection, Reply};

use crate::generator::json as generator;
use crate::normalizer;
use crate::parser::json;
use crate::validator;

pub async fn start_http_server(port: u16) -> Result<()> {
    // POST /submit endpoint for raw configuration submission
    let submit = warp::path("submit")
        .and(warp::post())
        .and(warp::body::content_length_limit(1024 * 1024)) // 1MB limit
        .and(warp::body::json())
        .and_then(handle_submit);

    // Healthcheck endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::json(&serde_json::json!({"status": "ok"})));

    let routes = submit.or(health);

    tracing::info!("Starting HTTP server on port {}", port);
    warp::serve(routes).run(([0, 0, 0, 0], port)).await;

    Ok(())
}

async fn handle_submit(json_input: Value) -> Result<impl Reply, Rejection> {
    // Convert JSON value to string
    let json_str = json_input.to_string();

    // Parse raw configuration
    let raw = match json::parse_json_str(&json_str) {
        Ok(raw) => raw,
        Err(err) => {
            return Ok(warp::reply::with_status(
                warp::reply::json(&serde_json::json!({
                    "success": false,
                    "error": format!("Parse error: {}", err)
                })),
                warp::http::StatusCode::BAD_REQUEST,
            ));
        }
    };

    // Normalize, then validate; the report carries every violation at once
    let canonical = normalizer::normalize(&raw);
    let report = validator::validate_config(&canonical);
    if !report.success {
        return Ok(warp::reply::with_status(
            warp::reply::json(&serde_json::json!({
                "success": false,
                "errors": report.messages
            })),
            warp::http::StatusCode::BAD_REQUEST,
        ));
    }

    // Respond with the canonical flat configuration
    match generator::generate_canonical_json(&canonical) {
        Ok(canonical_json) => {
            let configuration: Value =
                serde_json::from_str(&canonical_json).unwrap_or(Value::Null);
            Ok(warp::reply::with_status(
                warp::reply::json(&serde_json::json!({
                    "success": true,
                    "configuration": configuration
                })),
                warp::http::StatusCode::OK,
            ))
        }
        Err(err) => Ok(warp::reply::with_status(
            warp::reply::json(&serde_json::json!({
                "success": false,
                "error": format!("Generator error: {}", err)
            })),
            warp::http::StatusCode::INTERNAL_SERVER_ERROR,
        )),
    }
}
