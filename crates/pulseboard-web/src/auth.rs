use axum::{
    extract::{
        Request,
        State,
    },
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use pulseboard_core::infrastructure::bearer_token;
use pulseboard_core::Principal;

use crate::error::AppError;
use crate::state::AppState;

/// Paths served without a token
const PUBLIC_PATHS: &[&str] = &["/api/health"];

/// Resolves the caller's [`Principal`] and stores it as a request extension.
pub async fn auth_middleware(
    State(state): State<AppState>, mut req: Request, next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path().to_string();
    if !path.starts_with("/api/") || PUBLIC_PATHS.contains(&path.as_str()) {
        return Ok(next.run(req).await);
    }

    let verifier = &state.core.token_verifier;
    let principal = if verifier.requires_token() {
        let header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        let token = bearer_token(header)?.to_string();
        verifier.verify(&token).await.inspect_err(|e| {
            tracing::debug!(path = %path, error = %e, "Rejected request");
        })?
    } else {
        Principal::local_admin()
    };

    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}
