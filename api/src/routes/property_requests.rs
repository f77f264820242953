use actix_web::{web, HttpResponse};
use kloom_core::domain::entities::RequestId;
use kloom_core::repositories::{PropertyRepository, PropertyRequestRepository, UserRepository};
use kloom_shared::types::ApiResponse;

use super::validate_body;
use crate::app::AppState;
use crate::dto::{
    CreatePropertyRequestBody, PropertyRequestResponse, RequestListQuery,
    UpdatePropertyRequestBody,
};
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

/// Handler for POST /property-requests
///
/// The caller must be a franchise user. The request row and its preference
/// rows are stored together.
///
/// ```json
/// {
///     "title": "Cafe near Hongdae station",
///     "region_preference": "Mapo-gu",
///     "contact_name": "Lee",
///     "contact_phone": "010-1234-5678",
///     "preferences": [{ "min_area": 30.0, "max_rent": 2000000 }]
/// }
/// ```
pub async fn create_request<U, P, R>(
    auth: AuthContext,
    state: web::Data<AppState<U, P, R>>,
    request: web::Json<CreatePropertyRequestBody>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: PropertyRepository + 'static,
    R: PropertyRequestRepository + 'static,
{
    if let Err(response) = validate_body(&request.0) {
        return response;
    }

    let (attributes, preferences) = request.into_inner().into_parts();
    match state
        .requests
        .create_request(auth.user_id, attributes, preferences)
        .await
    {
        Ok(created) => HttpResponse::Created().json(
            ApiResponse::new(PropertyRequestResponse::from(created))
                .with_message("Property request created successfully"),
        ),
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for GET /property-requests
///
/// Query: `skip`, `limit` (1..=100, default 10), `franchise_id`, `status`.
pub async fn list_requests<U, P, R>(
    state: web::Data<AppState<U, P, R>>,
    query: web::Query<RequestListQuery>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: PropertyRepository + 'static,
    R: PropertyRequestRepository + 'static,
{
    if let Err(response) = validate_body(&query.0) {
        return response;
    }

    match state.requests.list_requests(query.filter(), query.page()).await {
        Ok(page) => HttpResponse::Ok().json(
            ApiResponse::list(page.map(PropertyRequestResponse::from))
                .with_message("Property requests retrieved successfully"),
        ),
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for GET /property-requests/{id}
pub async fn get_request<U, P, R>(
    state: web::Data<AppState<U, P, R>>,
    path: web::Path<RequestId>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: PropertyRepository + 'static,
    R: PropertyRequestRepository + 'static,
{
    match state.requests.get_request(path.into_inner()).await {
        Ok(found) => HttpResponse::Ok().json(
            ApiResponse::new(PropertyRequestResponse::from(found))
                .with_message("Property request retrieved successfully"),
        ),
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for PATCH /property-requests/{id}
///
/// A `preferences` array replaces the stored preferences; omit it to keep them.
pub async fn update_request<U, P, R>(
    auth: AuthContext,
    state: web::Data<AppState<U, P, R>>,
    path: web::Path<RequestId>,
    request: web::Json<UpdatePropertyRequestBody>,
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
        .requests
        .update_request(auth.user_id, path.into_inner(), request.into_inner().into())
        .await
    {
        Ok(updated) => HttpResponse::Ok().json(
            ApiResponse::new(PropertyRequestResponse::from(updated))
                .with_message("Property request updated successfully"),
        ),
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for DELETE /property-requests/{id}
pub async fn delete_request<U, P, R>(
    auth: AuthContext,
    state: web::Data<AppState<U, P, R>>,
    path: web::Path<RequestId>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: PropertyRepository + 'static,
    R: PropertyRequestRepository + 'static,
{
    let id = path.into_inner();
    match state.requests.delete_request(auth.user_id, id).await {
        Ok(()) => HttpResponse::Ok().json(
            ApiResponse::new(serde_json::json!({ "id": id }))
                .with_message("Property request deleted successfully"),
        ),
        Err(e) => handle_domain_error(e),
    }
}
