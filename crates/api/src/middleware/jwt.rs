use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::auth::Subject;
use crate::state::AppState;

/// Resolves the `authorization` header to a [`Subject`] and stores it in the
/// request extensions for the GraphQL handler. Missing or invalid tokens leave
/// the request anonymous; fields that need a subject reject it themselves.
pub async fn jwt_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let subject = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|token| state.jwt_service().resolve_subject(&state.store, token));

    if let Some(user) = subject {
        request.extensions_mut().insert(Subject(user));
    }

    next.run(request).await
}
