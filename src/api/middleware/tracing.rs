//! HTTP request/response tracing middleware.

use axum::body::Body;
use axum::http::Request;
use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{Level, Span};

/// Creates a tracing middleware for HTTP requests.
///
/// # Logging Behavior
///
/// **On Request:**
/// - Creates a span at `INFO` level with:
///   - HTTP method
///   - Path, without the query string
///   - HTTP version
///
/// **On Response:**
/// - Logs at `INFO` level with:
///   - Status code
///   - Latency in milliseconds
///
/// # Example Logs
///
/// ```text
/// INFO request{method=POST path=/app version=HTTP/1.1}: started processing request
/// INFO request{method=POST path=/app version=HTTP/1.1}: finished processing request latency=182 ms status=200
/// ```
///
/// # Integration
///
/// ```rust,ignore
/// let app = Router::new()
///     .merge(web::routes::embedded_routes())
///     .layer(tracing::layer());
/// ```
///
/// The query string is never recorded. Shopify loads the app with the
/// session token in `id_token`, and bearer tokens travel in the
/// `Authorization` header, which the span does not record either.
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, fn(&Request<Body>) -> Span>
{
    TraceLayer::new_for_http()
        .make_span_with(make_span as fn(&Request<Body>) -> Span)
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}

fn make_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %span_path(request),
        version = ?request.version(),
    )
}

fn span_path<B>(request: &Request<B>) -> &str {
    request.uri().path()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_path_drops_query() {
        let request = Request::get("/app?shop=acme.myshopify.com&id_token=eyJhbGciOi.secret.sig")
            .body(Body::empty())
            .unwrap();

        let path = span_path(&request);

        assert_eq!(path, "/app");
        assert!(!path.contains("id_token"));
        assert!(!path.contains("secret"));
    }

    #[test]
    fn test_span_path_without_query() {
        let request = Request::post("/app").body(Body::empty()).unwrap();

        assert_eq!(span_path(&request), "/app");
    }

    #[test]
    fn test_make_span_builds_without_subscriber() {
        let request = Request::get("/app?id_token=x").body(Body::empty()).unwrap();

        // Disabled without a subscriber; building it must not panic.
        let _span = make_span(&request);
    }
}
