use actix_web::{web, HttpResponse};
use kloom_core::domain::entities::{Profile, UserId};
use kloom_core::repositories::{PropertyRepository, PropertyRequestRepository, UserRepository};
use kloom_shared::types::{ApiResponse, Page};

use super::validate_body;
use crate::app::AppState;
use crate::dto::{CreateUserRequest, PropertyResponse, UpdateUserRequest, UserResponse};
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

/// Handler for POST /users
///
/// Registers a user with a bcrypt-hashed password. Returns 201 with the
/// created user, 409 if the email is already registered.
pub async fn create_user<U, P, R>(
    state: web::Data<AppState<U, P, R>>,
    request: web::Json<CreateUserRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: PropertyRepository + 'static,
    R: PropertyRequestRepository + 'static,
{
    if let Err(response) = validate_body(&request.0) {
        return response;
    }

    match state.users.create_user(request.into_inner().into()).await {
        Ok(user) => {
            log::info!("Created user {} with role {}", user.id, user.role);
            HttpResponse::Created().json(
                ApiResponse::new(UserResponse::from(user)).with_message("User created successfully"),
            )
        }
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for GET /users/{id}
pub async fn get_user<U, P, R>(
    state: web::Data<AppState<U, P, R>>,
    path: web::Path<UserId>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: PropertyRepository + 'static,
    R: PropertyRequestRepository + 'static,
{
    match state.users.get_user(path.into_inner()).await {
        Ok(user) => HttpResponse::Ok().json(
            ApiResponse::new(UserResponse::from(user)).with_message("User retrieved successfully"),
        ),
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for PATCH /users/{id}
///
/// Only the user themself may update the account; the role is fixed.
pub async fn update_user<U, P, R>(
    auth: AuthContext,
    state: web::Data<AppState<U, P, R>>,
    path: web::Path<UserId>,
    request: web::Json<UpdateUserRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: PropertyRepository + 'static,
    R: PropertyRequestRepository + 'static,
{
    if let Err(response) = validate_body(&request.0) {
        return response;
    }

    match state
        .users
        .update_user(auth.user_id, path.into_inner(), request.into_inner().into())
        .await
    {
        Ok(user) => HttpResponse::Ok().json(
            ApiResponse::new(UserResponse::from(user)).with_message("User updated successfully"),
        ),
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for DELETE /users/{id}
pub async fn delete_user<U, P, R>(
    auth: AuthContext,
    state: web::Data<AppState<U, P, R>>,
    path: web::Path<UserId>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: PropertyRepository + 'static,
    R: PropertyRequestRepository + 'static,
{
    let id = path.into_inner();
    match state.users.delete_user(auth.user_id, id).await {
        Ok(()) => HttpResponse::Ok().json(
            ApiResponse::new(serde_json::json!({ "id": id }))
                .with_message("User deleted successfully"),
        ),
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for PUT /users/{id}/profile
///
/// The body is tagged with the role, e.g. `{"role": "agent", "agency_name": "..."}`,
/// and must match the user's role.
pub async fn upsert_profile<U, P, R>(
    auth: AuthContext,
    state: web::Data<AppState<U, P, R>>,
    path: web::Path<UserId>,
    profile: web::Json<Profile>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: PropertyRepository + 'static,
    R: PropertyRequestRepository + 'static,
{
    match state
        .users
        .upsert_profile(auth.user_id, path.into_inner(), profile.into_inner())
        .await
    {
        Ok(profile) => HttpResponse::Ok()
            .json(ApiResponse::new(profile).with_message("Profile saved successfully")),
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for GET /users/{id}/profile
pub async fn get_profile<U, P, R>(
    state: web::Data<AppState<U, P, R>>,
    path: web::Path<UserId>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: PropertyRepository + 'static,
    R: PropertyRequestRepository + 'static,
{
    match state.users.get_profile(path.into_inner()).await {
        Ok(profile) => HttpResponse::Ok()
            .json(ApiResponse::new(profile).with_message("Profile retrieved successfully")),
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for GET /users/me/favorites
///
/// Most recently bookmarked first; deleted listings are left out.
pub async fn list_favorites<U, P, R>(
    auth: AuthContext,
    state: web::Data<AppState<U, P, R>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: PropertyRepository + 'static,
    R: PropertyRequestRepository + 'static,
{
    match state.properties.list_favorites(auth.user_id).await {
        Ok(properties) => {
            let total = properties.len() as u64;
            let items = properties.into_iter().map(PropertyResponse::from).collect();
            HttpResponse::Ok().json(
                ApiResponse::list(Page::new(items, total))
                    .with_message("Favorites retrieved successfully"),
            )
        }
        Err(e) => handle_domain_error(e),
    }
}
