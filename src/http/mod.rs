//! HTTP client module for backend testing
//!
//! Provides HTTP client functionality for exercising the status-check API.

mod client;

pub use client::{HttpClient, HttpError, HttpResponse};
