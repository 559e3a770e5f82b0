//! Logging middleware
//!
//! Request tracing for the HTTP API. Every request gets a span carrying
//! method and path; completion is logged with status and latency.

use std::time::Duration;
use axum::{body::Body, http::Request, response::Response};
use tower_http::classify::{ServerErrorsAsFailures, ServerErrorsFailureClass, SharedClassifier};
use tower_http::trace::{DefaultOnBodyChunk, DefaultOnEos, MakeSpan, OnFailure, OnRequest, OnResponse, TraceLayer};
use tracing::{debug, error, info, warn, Span};

/// Span factory for incoming requests
#[derive(Clone, Debug, Default)]
pub struct RequestSpan;

impl MakeSpan<Body> for RequestSpan {
    fn make_span(&mut self, request: &Request<Body>) -> Span {
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            path = %request.uri().path(),
        )
    }
}

#[derive(Clone, Debug, Default)]
pub struct LogRequest;

impl OnRequest<Body> for LogRequest {
    fn on_request(&mut self, request: &Request<Body>, _span: &Span) {
        debug!(query = request.uri().query().unwrap_or(""), "Request received");
    }
}

#[derive(Clone, Debug, Default)]
pub struct LogResponse;

impl<B> OnResponse<B> for LogResponse {
    fn on_response(self, response: &Response<B>, latency: Duration, _span: &Span) {
        let status = response.status();
        let latency_ms = latency.as_millis() as u64;

        // 5xx is reported by LogFailure
        if status.is_client_error() {
            warn!(status = status.as_u16(), latency_ms = latency_ms, "Request rejected");
        } else if !status.is_server_error() {
            info!(status = status.as_u16(), latency_ms = latency_ms, "Request completed");
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct LogFailure;

impl OnFailure<ServerErrorsFailureClass> for LogFailure {
    fn on_failure(&mut self, failure: ServerErrorsFailureClass, latency: Duration, _span: &Span) {
        error!(
            failure = %failure,
            latency_ms = latency.as_millis() as u64,
            "Request failed"
        );
    }
}

pub type HttpTraceLayer = TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    RequestSpan,
    LogRequest,
    LogResponse,
    DefaultOnBodyChunk,
    DefaultOnEos,
    LogFailure,
>;

/// Build the tracing layer applied to the whole router
pub fn trace_layer() -> HttpTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(RequestSpan)
        .on_request(LogRequest)
        .on_response(LogResponse)
        .on_failure(LogFailure)
}
