//! Request and response shapes plus the endpoint handlers.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::sync::Arc;

use super::error::ApiError;
use crate::domain::errors::DomainError;
use crate::domain::models::task::identifier;
use crate::domain::models::{Edge, ScoredTask, Strategy, Suggestion, WeightOverride, WeightVector};
use crate::services::{GraphNode, PrioritizationService};

pub type SharedService = Arc<PrioritizationService>;

/// Body of `POST /analyze`.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub tasks: Value,
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default)]
    pub weights: Option<WeightOverride>,
}

/// Query of `GET /suggest`. `tasks` and `weights` carry JSON text.
#[derive(Debug, Deserialize)]
pub struct SuggestParams {
    #[serde(default)]
    pub tasks: Option<String>,
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default)]
    pub weights: Option<String>,
}

/// Body of `POST /graph`.
#[derive(Debug, Deserialize)]
pub struct GraphRequest {
    #[serde(default)]
    pub tasks: Value,
}

/// Body of `POST /feedback`.
#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    #[serde(default, deserialize_with = "selected_ids")]
    pub selected: Vec<String>,
    #[serde(default = "default_helpful")]
    pub helpful: bool,
}

const fn default_helpful() -> bool {
    true
}

// Same id coercion as the task model, so numeric ids round-trip
fn selected_ids<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<Value>::deserialize(deserializer)?
        .iter()
        .enumerate()
        .map(|(i, value)| {
            identifier(value)
                .ok_or_else(|| de::Error::custom(format!("selected[{i}] is not a task id")))
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResult {
    pub tasks: Vec<ScoredTask>,
    pub cycles: Vec<Vec<String>>,
    pub strategy: Strategy,
    pub weights: WeightVector,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub result: AnalyzeResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<Suggestion>,
    pub cycles: Vec<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct GraphResponse {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<Edge>,
    pub cycles: Vec<Vec<String>>,
}

/// Acknowledgement of `POST /feedback`; intentionally empty.
#[derive(Debug, Serialize)]
pub struct FeedbackResponse {}

fn warning_for(cycles: &[Vec<String>]) -> Option<bool> {
    (!cycles.is_empty()).then_some(true)
}

/// Accept `tasks` as a list; absent or null means an empty batch.
fn task_list(tasks: Value) -> Result<Vec<Value>, DomainError> {
    match tasks {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => Ok(items),
        _ => Err(DomainError::MalformedRequest(
            "tasks must be a list".to_string(),
        )),
    }
}

pub async fn health_check() -> &'static str {
    "OK"
}

pub async fn analyze(
    State(service): State<SharedService>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Json(request) = payload?;
    let tasks = task_list(request.tasks)?;

    let analysis = service.analyze(
        &tasks,
        request.strategy.as_deref(),
        request.weights.as_ref(),
    )?;

    Ok(Json(AnalyzeResponse {
        warning: warning_for(&analysis.cycles),
        result: AnalyzeResult {
            tasks: analysis.tasks,
            cycles: analysis.cycles,
            strategy: analysis.strategy,
            weights: analysis.weights,
        },
    }))
}

pub async fn suggest(
    State(service): State<SharedService>,
    params: Result<Query<SuggestParams>, QueryRejection>,
) -> Result<Json<SuggestResponse>, ApiError> {
    let Query(params) = params?;

    let tasks = match params.tasks.as_deref() {
        Some(text) if !text.trim().is_empty() => {
            let parsed: Value = serde_json::from_str(text)
                .map_err(|_| ApiError::bad_request("invalid tasks JSON"))?;
            task_list(parsed)?
        }
        _ => Vec::new(),
    };

    let weights = match params.weights.as_deref() {
        Some(text) if !text.trim().is_empty() => Some(
            serde_json::from_str::<WeightOverride>(text)
                .map_err(|_| ApiError::bad_request("invalid weights JSON"))?,
        ),
        _ => None,
    };

    let set = service.suggest(&tasks, params.strategy.as_deref(), weights.as_ref())?;

    Ok(Json(SuggestResponse {
        warning: warning_for(&set.cycles),
        suggestions: set.suggestions,
        cycles: set.cycles,
    }))
}

pub async fn graph(
    State(service): State<SharedService>,
    payload: Result<Json<GraphRequest>, JsonRejection>,
) -> Result<Json<GraphResponse>, ApiError> {
    let Json(request) = payload?;
    let tasks = task_list(request.tasks)?;
    let view = service.graph(&tasks)?;

    Ok(Json(GraphResponse {
        nodes: view.nodes,
        edges: view.edges,
        cycles: view.cycles,
    }))
}

pub async fn feedback(
    State(service): State<SharedService>,
    payload: Result<Json<FeedbackRequest>, JsonRejection>,
) -> Result<Json<FeedbackResponse>, ApiError> {
    let Json(request) = payload?;
    service.feedback(&request.selected, request.helpful);
    Ok(Json(FeedbackResponse {}))
}

pub async fn weights(State(service): State<SharedService>) -> Json<WeightVector> {
    Json(service.current_weights())
}
