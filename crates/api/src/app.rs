use std::time::Duration;

use async_graphql_axum::{GraphQLProtocol, GraphQLWebSocket};
use axum::{
    extract::{Request, State, WebSocketUpgrade},
    http::{
        header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE},
        Method, StatusCode,
    },
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::auth::Subject;
use crate::error::AppError;
use crate::gql::AppSchema;
use crate::middleware::jwt::jwt_middleware;
use crate::state::AppState;

/// Build the Axum router with health endpoint and GraphQL.
pub fn build_router(state: AppState, schema: AppSchema, allowed_origins: &str) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .split(',')
        .filter_map(|o| o.trim().parse().ok())
        .collect();

    Router::new()
        .route("/health", get(health))
        // Queries and mutations over POST, subscriptions over a WebSocket upgrade
        .route(
            "/graphql",
            post({
                let schema = schema.clone();
                move |req| graphql_handler(req, schema)
            })
            .get({
                let schema = schema.clone();
                move |state, protocol, upgrade| graphql_ws_handler(state, protocol, upgrade, schema)
            }),
        )
        .with_state(state.clone())
        // Resolves the authorization header into a Subject
        .layer(middleware::from_fn_with_state(state, jwt_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([CONTENT_TYPE, AUTHORIZATION])
                .allow_credentials(true),
        )
}

/// Executes a GraphQL request, adding the subject resolved by the JWT
/// middleware (if any) to the request data.
async fn graphql_handler(req: Request, schema: AppSchema) -> Result<Response, AppError> {
    let subject = req.extensions().get::<Subject>().cloned();

    let (_parts, body) = req.into_parts();
    let body_bytes = axum::body::to_bytes(body, 2 * 1024 * 1024)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to read request body: {}", e)))?;

    let mut gql_request: async_graphql::Request = serde_json::from_slice(&body_bytes)
        .map_err(|e| AppError::BadRequest(format!("Invalid GraphQL request: {}", e)))?;

    if let Some(subject) = subject {
        gql_request = gql_request.data(subject);
    }

    let gql_response = schema.execute(gql_request).await;

    Ok(Json(gql_response).into_response())
}

/// WebSocket handler for GraphQL subscriptions. The token comes from the
/// `connection_init` payload and the handshake is refused when it does not
/// resolve to a user.
async fn graphql_ws_handler(
    State(state): State<AppState>,
    protocol: GraphQLProtocol,
    upgrade: WebSocketUpgrade,
    schema: AppSchema,
) -> Response {
    upgrade
        .protocols(["graphql-transport-ws", "graphql-ws"])
        .on_upgrade(move |stream| {
            GraphQLWebSocket::new(stream, schema, protocol)
                .on_connection_init(move |value: serde_json::Value| async move {
                    let subject = connection_token(&value)
                        .and_then(|token| state.jwt_service().resolve_subject(&state.store, token));

                    let Some(user) = subject else {
                        return Err(async_graphql::Error::new("Not Authenticated to subscribe"));
                    };

                    let mut data = async_graphql::Data::default();
                    data.insert(Subject(user));
                    Ok(data)
                })
                .serve()
        })
}

/// Token from `{ authorization }` or `{ headers: { Authorization } }`.
fn connection_token(params: &serde_json::Value) -> Option<&str> {
    params
        .get("authorization")
        .or_else(|| params.get("Authorization"))
        .or_else(|| params.get("headers").and_then(|h| h.get("Authorization")))
        .and_then(|v| v.as_str())
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    managers: usize,
    players: usize,
    users: usize,
}

/// Liveness plus record counts; fails when the store can't be read.
async fn health(State(state): State<AppState>) -> Result<Json<Health>, AppError> {
    Ok(Json(Health {
        status: "ok",
        managers: state.managers().list()?.len(),
        players: state.players().list()?.len(),
        users: state.users().count(),
    }))
}
