//! Application state and route table
//!
//! `configure` is shared by the binary and the integration tests, so both
//! run the same routes, extractor settings and middleware.

use std::sync::Arc;

use actix_web::{web, HttpResponse};
use kloom_core::repositories::{PropertyRepository, PropertyRequestRepository, UserRepository};
use kloom_core::services::{
    PropertyRequestService, PropertyService, UserService, UserServiceConfig,
};
use kloom_shared::config::JwtConfig;
use kloom_shared::errors::{error_codes, ErrorResponse};

use crate::handlers::error::{json_error_handler, path_error_handler, query_error_handler};
use crate::middleware::auth::JwtAuth;
use crate::routes::{properties, property_requests, users};

/// Application state that holds shared services
pub struct AppState<U, P, R>
where
    U: UserRepository,
    P: PropertyRepository,
    R: PropertyRequestRepository,
{
    pub users: Arc<UserService<U>>,
    pub properties: Arc<PropertyService<P, U>>,
    pub requests: Arc<PropertyRequestService<R, U>>,
}

impl<U, P, R> AppState<U, P, R>
where
    U: UserRepository,
    P: PropertyRepository,
    R: PropertyRequestRepository,
{
    /// Wire the services over one set of repositories
    pub fn new(
        user_repository: Arc<U>,
        property_repository: Arc<P>,
        request_repository: Arc<R>,
        user_config: UserServiceConfig,
    ) -> Self {
        Self {
            users: Arc::new(UserService::new(user_repository.clone(), user_config)),
            properties: Arc::new(PropertyService::new(
                property_repository,
                user_repository.clone(),
            )),
            requests: Arc::new(PropertyRequestService::new(
                request_repository,
                user_repository,
            )),
        }
    }
}

/// Register every route; mutations are wrapped with [`JwtAuth`]
///
/// The caller provides `web::Data<AppState<U, P, R>>`. JSON bodies larger
/// than `max_payload_size` bytes are rejected with 400.
pub fn configure<U, P, R>(
    cfg: &mut web::ServiceConfig,
    jwt: &JwtConfig,
    max_payload_size: usize,
) where
    U: UserRepository + 'static,
    P: PropertyRepository + 'static,
    R: PropertyRequestRepository + 'static,
{
    let auth = JwtAuth::new(jwt.clone());

    cfg.app_data(
        web::JsonConfig::default()
            .limit(max_payload_size)
            .error_handler(json_error_handler),
    )
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/users")
                .route("", web::post().to(users::create_user::<U, P, R>))
                .route(
                    "/me/favorites",
                    web::get()
                        .to(users::list_favorites::<U, P, R>)
                        .wrap(auth.clone()),
                )
                .service(
                    web::resource("/{id}")
                        .route(web::get().to(users::get_user::<U, P, R>))
                        .route(
                            web::patch()
                                .to(users::update_user::<U, P, R>)
                                .wrap(auth.clone()),
                        )
                        .route(
                            web::delete()
                                .to(users::delete_user::<U, P, R>)
                                .wrap(auth.clone()),
                        ),
                )
                .service(
                    web::resource("/{id}/profile")
                        .route(web::get().to(users::get_profile::<U, P, R>))
                        .route(
                            web::put()
                                .to(users::upsert_profile::<U, P, R>)
                                .wrap(auth.clone()),
                        ),
                ),
        )
        .service(
            web::scope("/properties")
                .service(
                    web::resource("")
                        .route(web::get().to(properties::list_properties::<U, P, R>))
                        .route(
                            web::post()
                                .to(properties::create_property::<U, P, R>)
                                .wrap(auth.clone()),
                        ),
                )
                .service(
                    web::resource("/{id}")
                        .route(web::get().to(properties::get_property::<U, P, R>))
                        .route(
                            web::patch()
                                .to(properties::update_property::<U, P, R>)
                                .wrap(auth.clone()),
                        )
                        .route(
                            web::delete()
                                .to(properties::delete_property::<U, P, R>)
                                .wrap(auth.clone()),
                        ),
                )
                .service(
                    web::resource("/{id}/images")
                        .route(web::get().to(properties::list_images::<U, P, R>))
                        .route(
                            web::post()
                                .to(properties::add_image::<U, P, R>)
                                .wrap(auth.clone()),
                        ),
                )
                .service(
                    web::resource("/{id}/favorite")
                        .route(
                            web::post()
                                .to(properties::add_favorite::<U, P, R>)
                                .wrap(auth.clone()),
                        )
                        .route(
                            web::delete()
                                .to(properties::remove_favorite::<U, P, R>)
                                .wrap(auth.clone()),
                        ),
                ),
        )
        .service(
            web::scope("/property-requests")
                .service(
                    web::resource("")
                        .route(web::get().to(property_requests::list_requests::<U, P, R>))
                        .route(
                            web::post()
                                .to(property_requests::create_request::<U, P, R>)
                                .wrap(auth.clone()),
                        ),
                )
                .service(
                    web::resource("/{id}")
                        .route(web::get().to(property_requests::get_request::<U, P, R>))
                        .route(
                            web::patch()
                                .to(property_requests::update_request::<U, P, R>)
                                .wrap(auth.clone()),
                        )
                        .route(
                            web::delete()
                                .to(property_requests::delete_request::<U, P, R>)
                                .wrap(auth),
                        ),
                ),
        )
        .default_service(web::route().to(not_found));
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "kloom-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
