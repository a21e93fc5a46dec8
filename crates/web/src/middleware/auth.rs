use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use crate::error::WebError;
use crate::tokens::TokenService;

/// Verifies the bearer token and stores the resulting
/// [`AuthUser`](crate::tokens::AuthUser) in the request extensions.
pub async fn require_auth(
    State(tokens): State<TokenService>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, WebError> {
    let Some(TypedHeader(Authorization(bearer))) = bearer else {
        tracing::warn!("Missing bearer token");
        return Err(WebError::Unauthorized);
    };

    let user = tokens.verify(bearer.token()).map_err(|e| {
        tracing::warn!("Rejected bearer token: {}", e);
        WebError::Unauthorized
    })?;

    tracing::debug!(user_id = %user.user_id, "Authenticated request");
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
