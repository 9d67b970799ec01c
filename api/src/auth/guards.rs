use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use axum::{
    Json,
    body::Body,
    extract::FromRequestParts,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use db::models::person::Category;

#[derive(serde::Serialize, Default)]
pub struct Empty;

/// Extracts and validates the caller from request extensions, then inserts
/// the `AuthUser` back so downstream handlers can read it.
async fn extract_and_insert_authuser(
    req: Request<Body>,
) -> Result<(Request<Body>, AuthUser), (StatusCode, Json<ApiResponse<Empty>>)> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error("Authentication required")),
            )
        })?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user.clone());
    Ok((req, user))
}

/// Any valid bearer token passes.
pub async fn allow_authenticated(
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let (req, _user) = extract_and_insert_authuser(req).await?;
    Ok(next.run(req).await)
}

/// Faculty-only routes: directory listing, ledger queries, the display code.
pub async fn allow_faculty(
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let (req, AuthUser(claims)) = extract_and_insert_authuser(req).await?;

    if claims.category != Category::Faculty {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Faculty access required")),
        ));
    }

    Ok(next.run(req).await)
}
