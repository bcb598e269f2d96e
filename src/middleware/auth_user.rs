use std::sync::Arc;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;

use crate::middleware::error::{AppError, CtxError};
use crate::middleware::mw_ctx::{CtxState, TOKEN_KEY};
use crate::routes::likes::SERVICE_NAME;

/// Caller identity, resolved from the `token` cookie through the auth service.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub uid: String,
}

#[async_trait]
impl FromRequestParts<Arc<CtxState>> for AuthUser {
    type Rejection = CtxError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<CtxState>,
    ) -> Result<Self, Self::Rejection> {
        let cookies = CookieJar::from_headers(&parts.headers);

        let token = cookies
            .get(TOKEN_KEY)
            .map(|cookie| cookie.value().to_string())
            .ok_or(AppError::AuthFailNoTokenCookie)?;

        let user = state.auth.check(SERVICE_NAME, &token).await?;

        Ok(AuthUser { uid: user.uid })
    }
}
