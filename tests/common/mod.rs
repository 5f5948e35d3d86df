//! Common test utilities for integration tests
//!
//! Provides a service pinned to a fixed date and helpers for driving the
//! HTTP router in-process.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use triage::adapters::http::build_router;
use triage::domain::ports::FixedClock;
use triage::{Config, PrioritizationService};

/// Wednesday, so the following working days are easy to count
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()
}

/// Service with default configuration and a fixed evaluation date
pub fn service() -> PrioritizationService {
    service_with(&Config::default())
}

pub fn service_with(config: &Config) -> PrioritizationService {
    PrioritizationService::from_config(config).with_clock(Arc::new(FixedClock(today())))
}

/// Router over a fresh service; clones share learning state
pub fn router() -> Router {
    router_with(&Config::default())
}

pub fn router_with(config: &Config) -> Router {
    build_router(Arc::new(service_with(config)), false)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}

pub async fn post_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    post_raw(app, uri, &body.to_string()).await
}

pub async fn post_raw(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

/// `/suggest` query string for a batch and optional strategy
pub fn suggest_uri(tasks: &Value, strategy: Option<&str>) -> String {
    let mut uri = format!("/suggest?tasks={}", encode_query(&tasks.to_string()));
    if let Some(strategy) = strategy {
        uri.push_str("&strategy=");
        uri.push_str(&encode_query(strategy));
    }
    uri
}

/// Percent-encode everything outside the unreserved set
pub fn encode_query(raw: &str) -> String {
    raw.bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{b:02X}"),
        })
        .collect()
}

/// IDs of a JSON task list, in order
pub fn ids(tasks: &Value) -> Vec<String> {
    tasks
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap().to_string())
        .collect()
}
