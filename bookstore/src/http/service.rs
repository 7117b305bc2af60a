// SPDX-License-Identifier: AGPL-3.0-or-later

use std::any::Any as PanicPayload;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use axum::error_handling::HandleErrorLayer;
use axum::extract::Extension;
use axum::http::Method;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{BoxError, Router};
use http::header::CONTENT_TYPE;
use log::{debug, error};
use tower::timeout::error::Elapsed;
use tower::timeout::TimeoutLayer;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};

use crate::context::Context;
use crate::http::api::{
    create_author, create_country, delete_author, delete_country, get_author, get_authors,
    get_countries, get_country, update_author, update_country,
};
use crate::http::context::HttpServiceContext;
use crate::http::response::{Empty, Envelope};
use crate::manager::Shutdown;

/// Build HTTP server with the REST API.
pub fn build_server(http_context: HttpServiceContext, request_timeout: Duration) -> Router {
    let router = Router::new()
        .route(
            "/authors",
            get(get_authors)
                .post(create_author)
                .fallback(handle_method_not_allowed),
        )
        .route(
            "/authors/:id",
            get(get_author)
                .put(update_author)
                .delete(delete_author)
                .fallback(handle_method_not_allowed),
        )
        .route(
            "/countries",
            get(get_countries)
                .post(create_country)
                .fallback(handle_method_not_allowed),
        )
        .route(
            "/countries/:id",
            get(get_country)
                .put(update_country)
                .delete(delete_country)
                .fallback(handle_method_not_allowed),
        );

    with_middlewares(router, http_context, request_timeout)
}

/// Wraps all routes with the fallback, middlewares and shared context.
fn with_middlewares(
    router: Router,
    http_context: HttpServiceContext,
    request_timeout: Duration,
) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(false)
        .allow_origin(Any);

    router
        .fallback(handle_not_found)
        // Abort requests taking too long, this drops and rolls back their transactions
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout))
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        // Add shared context
        .layer(Extension(http_context))
}

async fn handle_not_found() -> Envelope<Empty> {
    Envelope::not_found()
}

async fn handle_method_not_allowed() -> Envelope<Empty> {
    Envelope::method_not_allowed()
}

async fn handle_timeout(err: BoxError) -> Envelope<Empty> {
    if err.is::<Elapsed>() {
        Envelope::request_timeout()
    } else {
        error!("Unhandled error in middleware: {}", err);
        Envelope::unhandled_error()
    }
}

fn handle_panic(payload: Box<dyn PanicPayload + Send + 'static>) -> Response {
    let details = if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else {
        "unknown panic payload"
    };

    error!("Recovered from panic while handling request: {}", details);
    Envelope::<Empty>::unhandled_error().into_response()
}

/// Start HTTP server.
pub async fn http_service(context: Context, signal: Shutdown) -> Result<()> {
    let http_address = SocketAddr::new(context.config.http_host, context.config.http_port);

    // Introduce a new context for all HTTP routes
    let http_context = HttpServiceContext::new(context.store.clone());
    let router = build_server(http_context, context.config.request_timeout());

    let server = axum::Server::try_bind(&http_address)?.serve(router.into_make_service());
    debug!("HTTP service is listening on {}", server.local_addr());

    server.with_graceful_shutdown(signal).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::routing::get;
    use axum::Router;
    use http::StatusCode;
    use rstest::rstest;
    use serde_json::{json, Value};

    use crate::http::context::HttpServiceContext;
    use crate::test_utils::{http_test_client, test_runner, TestClient, TestNode};

    use super::with_middlewares;

    fn client(node: &TestNode, request_timeout: Duration) -> TestClient {
        let router = Router::new()
            .route(
                "/panic",
                get(|| async {
                    panic!("Handler went wrong");
                    #[allow(unreachable_code)]
                    ()
                }),
            )
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "Done"
                }),
            );

        let http_context = HttpServiceContext::new(node.context.store.clone());
        TestClient::new(with_middlewares(router, http_context, request_timeout))
    }

    #[rstest]
    fn unknown_route_is_not_found() {
        test_runner(|node: TestNode| async move {
            let client = client(&node, Duration::from_secs(5));

            let response = client.get("/books").send().await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            assert_eq!(
                response.json::<Value>().await,
                json!({ "status": 404, "message": "Not Found" })
            );
        });
    }

    #[rstest]
    fn unsupported_method_is_enveloped() {
        test_runner(|node: TestNode| async move {
            let client = http_test_client(&node);

            for response in [
                client.put("/authors").send().await,
                client.post("/countries/1").send().await,
            ] {
                assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
                assert_eq!(response.headers()["content-type"], "application/json");
                assert_eq!(
                    response.json::<Value>().await,
                    json!({ "status": 405, "message": "Method Not Allowed" })
                );
            }
        });
    }

    #[rstest]
    fn recovers_from_panics() {
        test_runner(|node: TestNode| async move {
            let client = client(&node, Duration::from_secs(5));

            let response = client.get("/panic").send().await;
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(
                response.json::<Value>().await,
                json!({
                    "status": 500,
                    "message": "Unhandled error occurred. Please try again later"
                })
            );
        });
    }

    #[rstest]
    fn aborts_slow_requests() {
        test_runner(|node: TestNode| async move {
            let client = client(&node, Duration::from_millis(100));

            let response = client.get("/slow").send().await;
            assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
            assert_eq!(
                response.json::<Value>().await["message"],
                json!("Request Timeout")
            );
        });
    }

    #[rstest]
    fn answers_cors_preflight() {
        test_runner(|node: TestNode| async move {
            let client = client(&node, Duration::from_secs(5));

            let response = client
                .options("/authors")
                .header("origin", "http://localhost:3000")
                .header("access-control-request-method", "PUT")
                .send()
                .await;
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(response.headers()["access-control-allow-origin"], "*");
        });
    }
}
