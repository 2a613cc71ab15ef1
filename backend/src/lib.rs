//! # Student Performance Predictor
//!
//! Predicts a student performance index from five study-habit features using
//! a random forest trained offline, behind a small REST API.
//!
//! ## Features
//!
//! - **Schema parsing**: Field-level validation of raw JSON request bodies
//! - **Realism checks**: Ordered rules rejecting implausible daily routines
//! - **Inference**: Random forest artifact loaded once and shared read-only
//! - **Feedback**: Advisory messages derived from the accepted input
//! - **Training**: Offline synthesis, fitting and evaluation of the forest
//! - **HTTP API**: `POST /predict/`, `GET /health/` and a static UI page
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Request, feature vector and result types
//! - [`services`]: Realism validation, feedback and prediction orchestration
//! - [`artifact`]: Model file format, loading and the [`artifact::Regressor`] seam
//! - [`training`]: Offline dataset synthesis and forest fitting
//! - [`config`]: Server configuration from TOML and environment
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod artifact;
pub mod config;
pub mod models;
pub mod services;
pub mod training;

#[cfg(feature = "http-server")]
pub mod http;
