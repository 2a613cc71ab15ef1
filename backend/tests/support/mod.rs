#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use perf_predictor::artifact::{InferenceError, Regressor};
use perf_predictor::http::{create_router, AppState};
use perf_predictor::models::FEATURE_NAMES;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores variables on unwind and serializes access to process-global env
/// vars, since tests in one binary run in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

fn canonical_names() -> Vec<String> {
    FEATURE_NAMES.iter().map(|s| s.to_string()).collect()
}

/// Returns the same score for every input.
pub struct ConstantModel {
    names: Vec<String>,
    score: f64,
}

impl ConstantModel {
    pub fn new(score: f64) -> Self {
        Self {
            names: canonical_names(),
            score,
        }
    }
}

impl Regressor for ConstantModel {
    fn feature_names(&self) -> &[String] {
        &self.names
    }

    fn predict(&self, _features: &[f64]) -> Result<f64, InferenceError> {
        Ok(self.score)
    }
}

/// Scores an input as its previous score plus the hours studied, so tests can
/// tell that features arrive in the declared order.
pub struct LinearModel {
    names: Vec<String>,
}

impl LinearModel {
    pub fn new() -> Self {
        Self {
            names: canonical_names(),
        }
    }
}

impl Regressor for LinearModel {
    fn feature_names(&self) -> &[String] {
        &self.names
    }

    fn predict(&self, features: &[f64]) -> Result<f64, InferenceError> {
        Ok(features[1] + features[0])
    }
}

/// Always fails during inference.
pub struct FailingModel {
    names: Vec<String>,
}

impl FailingModel {
    pub fn new() -> Self {
        Self {
            names: canonical_names(),
        }
    }
}

impl Regressor for FailingModel {
    fn feature_names(&self) -> &[String] {
        &self.names
    }

    fn predict(&self, _features: &[f64]) -> Result<f64, InferenceError> {
        Err(InferenceError::NonFiniteOutput)
    }
}

/// Declares a feature the input schema does not have.
pub struct MismatchedModel {
    names: Vec<String>,
}

impl MismatchedModel {
    pub fn new() -> Self {
        Self {
            names: vec!["hours_studied".to_string(), "attendance".to_string()],
        }
    }
}

impl Regressor for MismatchedModel {
    fn feature_names(&self) -> &[String] {
        &self.names
    }

    fn predict(&self, _features: &[f64]) -> Result<f64, InferenceError> {
        Ok(50.0)
    }
}

pub fn router_with<M: Regressor + 'static>(model: M) -> Router {
    create_router(AppState::new(Arc::new(model)))
}

/// Send a request through the router and decode the JSON body.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body is JSON")
    };
    (status, body)
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

pub async fn post_predict(app: Router, body: Value) -> (StatusCode, Value) {
    send(app, post_json("/predict/", &body.to_string())).await
}
