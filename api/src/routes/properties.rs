use actix_web::{web, HttpResponse};
use kloom_core::domain::entities::PropertyId;
use kloom_core::repositories::{PropertyRepository, PropertyRequestRepository, UserRepository};
use kloom_shared::types::{ApiResponse, Page};

use super::validate_body;
use crate::app::AppState;
use crate::dto::{
    AddImageRequest, CreatePropertyRequest, PropertyDetailResponse, PropertyListQuery,
    PropertyResponse, UpdatePropertyRequest,
};
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

/// Handler for POST /properties
///
/// The authenticated caller becomes the listing's agent and must hold the
/// agent role.
pub async fn create_property<U, P, R>(
    auth: AuthContext,
    state: web::Data<AppState<U, P, R>>,
    request: web::Json<CreatePropertyRequest>,
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
        .properties
        .create_property(auth.user_id, request.into_inner().into())
        .await
    {
        Ok(property) => HttpResponse::Created().json(
            ApiResponse::new(PropertyResponse::from(property))
                .with_message("Property created successfully"),
        ),
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for GET /properties
///
/// Query: `skip`, `limit` (1..=100, default 10), `agent_id`, `status`.
pub async fn list_properties<U, P, R>(
    state: web::Data<AppState<U, P, R>>,
    query: web::Query<PropertyListQuery>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: PropertyRepository + 'static,
    R: PropertyRequestRepository + 'static,
{
    if let Err(response) = validate_body(&query.0) {
        return response;
    }

    match state
        .properties
        .list_properties(query.filter(), query.page())
        .await
    {
        Ok(page) => HttpResponse::Ok().json(
            ApiResponse::list(page.map(PropertyResponse::from))
                .with_message("Properties retrieved successfully"),
        ),
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for GET /properties/{id}
///
/// Includes the agent's name and phone.
pub async fn get_property<U, P, R>(
    state: web::Data<AppState<U, P, R>>,
    path: web::Path<PropertyId>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: PropertyRepository + 'static,
    R: PropertyRequestRepository + 'static,
{
    match state.properties.get_property_detail(path.into_inner()).await {
        Ok(detail) => HttpResponse::Ok().json(
            ApiResponse::new(PropertyDetailResponse::from(detail))
                .with_message("Property retrieved successfully"),
        ),
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for PATCH /properties/{id}
pub async fn update_property<U, P, R>(
    auth: AuthContext,
    state: web::Data<AppState<U, P, R>>,
    path: web::Path<PropertyId>,
    request: web::Json<UpdatePropertyRequest>,
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
        .properties
        .update_property(auth.user_id, path.into_inner(), request.into_inner().into())
        .await
    {
        Ok(property) => HttpResponse::Ok().json(
            ApiResponse::new(PropertyResponse::from(property))
                .with_message("Property updated successfully"),
        ),
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for DELETE /properties/{id}
pub async fn delete_property<U, P, R>(
    auth: AuthContext,
    state: web::Data<AppState<U, P, R>>,
    path: web::Path<PropertyId>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: PropertyRepository + 'static,
    R: PropertyRequestRepository + 'static,
{
    let id = path.into_inner();
    match state.properties.delete_property(auth.user_id, id).await {
        Ok(()) => HttpResponse::Ok().json(
            ApiResponse::new(serde_json::json!({ "id": id }))
                .with_message("Property deleted successfully"),
        ),
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for POST /properties/{id}/images
pub async fn add_image<U, P, R>(
    auth: AuthContext,
    state: web::Data<AppState<U, P, R>>,
    path: web::Path<PropertyId>,
    request: web::Json<AddImageRequest>,
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
        .properties
        .add_image(auth.user_id, path.into_inner(), request.into_inner().into())
        .await
    {
        Ok(image) => HttpResponse::Created()
            .json(ApiResponse::new(image).with_message("Image added successfully")),
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for GET /properties/{id}/images
pub async fn list_images<U, P, R>(
    state: web::Data<AppState<U, P, R>>,
    path: web::Path<PropertyId>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: PropertyRepository + 'static,
    R: PropertyRequestRepository + 'static,
{
    match state.properties.list_images(path.into_inner()).await {
        Ok(images) => {
            let total = images.len() as u64;
            HttpResponse::Ok().json(
                ApiResponse::list(Page::new(images, total))
                    .with_message("Images retrieved successfully"),
            )
        }
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for POST /properties/{id}/favorite
///
/// Idempotent: bookmarking twice returns the existing favorite.
pub async fn add_favorite<U, P, R>(
    auth: AuthContext,
    state: web::Data<AppState<U, P, R>>,
    path: web::Path<PropertyId>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: PropertyRepository + 'static,
    R: PropertyRequestRepository + 'static,
{
    match state
        .properties
        .add_favorite(auth.user_id, path.into_inner())
        .await
    {
        Ok(favorite) => HttpResponse::Ok()
            .json(ApiResponse::new(favorite).with_message("Property added to favorites")),
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for DELETE /properties/{id}/favorite
pub async fn remove_favorite<U, P, R>(
    auth: AuthContext,
    state: web::Data<AppState<U, P, R>>,
    path: web::Path<PropertyId>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: PropertyRepository + 'static,
    R: PropertyRequestRepository + 'static,
{
    let property_id = path.into_inner();
    match state
        .properties
        .remove_favorite(auth.user_id, property_id)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(
            ApiResponse::new(serde_json::json!({ "property_id": property_id }))
                .with_message("Property removed from favorites"),
        ),
        Err(e) => handle_domain_error(e),
    }
}
