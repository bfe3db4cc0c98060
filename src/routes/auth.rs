use actix_web::{
    cookie::{time::Duration as CookieDuration, Cookie, SameSite},
    web, HttpResponse,
};
use serde_json::json;
use validator::Validate;

use crate::{
    auth::{hash_password, AuthResponse, UserIdentity, TOKEN_COOKIE},
    config::AuthConfig,
    error::AppError,
    models::{LoginRequest, RegisterRequest},
    state::AppState,
};

fn session_cookie(token: &str, auth: &AuthConfig) -> Cookie<'static> {
    Cookie::build(TOKEN_COOKIE, token.to_string())
        .path("/")
        .http_only(true)
        .secure(auth.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::hours(auth.token_ttl_hours))
        .finish()
}

fn signed_in(
    mut response: actix_web::HttpResponseBuilder,
    state: &AppState,
    identity: UserIdentity,
) -> Result<HttpResponse, AppError> {
    let token = state.tokens.issue(&identity)?;
    Ok(response
        .cookie(session_cookie(&token, &state.auth))
        .json(AuthResponse {
            token,
            user_id: identity.id,
        }))
}

/// Register a new user
///
/// Creates an account and signs the new user in.
pub async fn register(
    state: web::Data<AppState>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    if state.users.find_by_email(&payload.email).await?.is_some() {
        return Err(AppError::BadRequest("Email already registered".into()));
    }

    let password_hash = hash_password(&payload.password)?;
    let user = state.users.insert(&payload.email, &password_hash).await?;
    log::info!("Registered user {} ({})", user.id, user.email);

    signed_in(HttpResponse::Created(), &state, UserIdentity::new(user.id))
}

/// Login user
///
/// Returns a token in the body and as the `token` cookie. Unknown emails and wrong
/// passwords get the same 401.
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let identity = state
        .credentials
        .verify(&payload.email, &payload.password)
        .await?;

    signed_in(HttpResponse::Ok(), &state, identity)
}

/// Logout user
///
/// Tokens are stateless, so this only tells the client to drop its cookie.
pub async fn logout() -> HttpResponse {
    let mut cookie = Cookie::build(TOKEN_COOKIE, "").path("/").finish();
    cookie.make_removal();

    HttpResponse::Ok()
        .cookie(cookie)
        .json(json!({ "message": "Logged out successfully" }))
}

/// Current user
///
/// Resolves the identity carried by the token back to the stored account.
pub async fn me(
    state: web::Data<AppState>,
    identity: UserIdentity,
) -> Result<HttpResponse, AppError> {
    let user = state
        .users
        .find_by_id(identity.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(HttpResponse::Ok().json(user))
}
