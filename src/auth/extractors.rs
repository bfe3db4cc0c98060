use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::error::AppError;

/// The authenticated caller, as placed in request extensions by `AuthGate`.
///
/// Handlers on gated routes take this as an argument to receive the typed identity.
/// On a route without the gate the extension is missing and extraction fails with 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserIdentity {
    pub id: Uuid,
}

impl UserIdentity {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

impl FromRequest for UserIdentity {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<UserIdentity>().copied() {
            Some(identity) => ready(Ok(identity)),
            None => {
                let err = AppError::Unauthorized("Authorization denied.".to_string());
                ready(Err(err.into()))
            }
        }
    }
}
