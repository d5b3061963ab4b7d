//! Wraps each request in a `request` span so handler, service and store logs
//! carry the trace id, the route template and, on deck routes, the deck id.
//!
//! Must sit inside `RequestTrace`, which supplies the trace id.

use std::future::{ready, Ready};

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::Error;
use futures_util::future::LocalBoxFuture;
use tracing::{info_span, Instrument};

use super::request_trace::request_id;

#[derive(Clone, Default)]
pub struct TraceSpan;

impl<S, B> Transform<S, ServiceRequest> for TraceSpan
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceSpanMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceSpanMiddleware { service }))
    }
}

pub struct TraceSpanMiddleware<S> {
    service: S,
}

/// Raw `{id}` segment of `/decks/{id}` and `/decks/{id}/cards`.
fn deck_segment(path: &str) -> Option<&str> {
    let rest = path.strip_prefix("/decks/")?;
    let id = rest.split('/').next()?;
    (!id.is_empty()).then_some(id)
}

impl<S, B> Service<ServiceRequest> for TraceSpanMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = request_id(&req).unwrap_or_else(|| "missing-trace-id".to_string());
        let route = req
            .match_pattern()
            .unwrap_or_else(|| "unmatched".to_string());

        let span = info_span!(
            "request",
            trace_id = %trace_id,
            method = %req.method(),
            route = %route,
            deck_id = tracing::field::Empty,
        );
        if let Some(id) = deck_segment(req.path()) {
            span.record("deck_id", id);
        }

        Box::pin(self.service.call(req).instrument(span))
    }
}
