use std::sync::Arc;

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::{TokenService, UserIdentity};
use crate::error::AppError;

/// Name of the cookie checked before the `Authorization` header.
pub const TOKEN_COOKIE: &str = "token";

/// Rejects requests without a valid token; on success stores the caller's `UserIdentity`
/// in request extensions for the handler.
///
/// Wrap it around the mutating resources only. Rejections are rendered here as a 401
/// response so the wrapped handler, and its body extractors, never run.
#[derive(Clone)]
pub struct AuthGate {
    tokens: Arc<TokenService>,
}

impl AuthGate {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthGateService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateService {
            service,
            tokens: self.tokens.clone(),
        }))
    }
}

pub struct AuthGateService<S> {
    service: S,
    tokens: Arc<TokenService>,
}

/// Cookie `token` first, then `Authorization: Bearer <token>`.
fn extract_token(req: &ServiceRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(TOKEN_COOKIE) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

impl<S> AuthGateService<S> {
    fn authenticate(&self, req: &ServiceRequest) -> Result<UserIdentity, AppError> {
        let token = extract_token(req).ok_or_else(|| {
            log::warn!("Authorization denied for {}: no token provided", req.path());
            AppError::Unauthorized("Authorization denied.".into())
        })?;

        self.tokens.verify(&token).map_err(|invalid| {
            log::warn!("Authorization denied for {}: token rejected", req.path());
            AppError::from(invalid)
        })
    }
}

impl<S, B> Service<ServiceRequest> for AuthGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match self.authenticate(&req) {
            Ok(identity) => {
                req.extensions_mut().insert(identity);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(app_err) => {
                Box::pin(async move { Ok(req.error_response(app_err).map_into_right_body()) })
            }
        }
    }
}
