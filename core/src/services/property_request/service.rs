use std::sync::Arc;

use kloom_shared::types::{Page, PageRequest};

use crate::domain::entities::property_request::{
    NewPropertyRequest, PreferenceCriteria, PropertyRequest, PropertyRequestChanges,
    RequestAttributes, RequestFilter, RequestId,
};
use crate::domain::entities::user::UserId;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{PropertyRequestRepository, UserRepository};
use crate::services::ensure_valid_page;

/// Service for franchise sourcing requests
///
/// Only franchise users may raise requests, and only the requesting
/// franchise may change or withdraw one.
pub struct PropertyRequestService<R, U>
where
    R: PropertyRequestRepository,
    U: UserRepository,
{
    requests: Arc<R>,
    users: Arc<U>,
}

impl<R, U> PropertyRequestService<R, U>
where
    R: PropertyRequestRepository,
    U: UserRepository,
{
    pub fn new(requests: Arc<R>, users: Arc<U>) -> Self {
        Self { requests, users }
    }

    pub async fn create_request(
        &self,
        franchise_id: UserId,
        attributes: RequestAttributes,
        preferences: Vec<PreferenceCriteria>,
    ) -> DomainResult<PropertyRequest> {
        attributes.validate()?;
        for preference in &preferences {
            preference.validate()?;
        }

        let requester = self
            .users
            .find_by_id(franchise_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;
        if !requester.is_franchise() {
            return Err(DomainError::unauthorized(
                "Only franchise users can create property requests",
            ));
        }

        let request = self
            .requests
            .create(NewPropertyRequest::new(franchise_id, attributes, preferences))
            .await?;
        tracing::info!(
            request_id = request.id,
            franchise_id = franchise_id,
            preferences = request.preferences.len(),
            event = "property_request_created",
            "Created property request"
        );
        Ok(request)
    }

    pub async fn get_request(&self, id: RequestId) -> DomainResult<PropertyRequest> {
        self.requests
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("PropertyRequest"))
    }

    pub async fn list_requests(
        &self,
        filter: RequestFilter,
        page: PageRequest,
    ) -> DomainResult<Page<PropertyRequest>> {
        ensure_valid_page(&page)?;
        self.requests.list(&filter, page).await
    }

    async fn ensure_owner(&self, caller: UserId, id: RequestId) -> DomainResult<PropertyRequest> {
        let request = self.get_request(id).await?;
        if !request.is_owned_by(caller) {
            tracing::warn!(
                request_id = id,
                user_id = caller,
                event = "property_request_owner_mismatch",
                "Caller does not own the property request"
            );
            return Err(DomainError::unauthorized(
                "Only the requesting franchise can modify this request",
            ));
        }
        Ok(request)
    }

    /// Partial update; supplied preferences replace the existing set
    pub async fn update_request(
        &self,
        caller: UserId,
        id: RequestId,
        changes: PropertyRequestChanges,
    ) -> DomainResult<PropertyRequest> {
        changes.validate()?;
        let request = self.ensure_owner(caller, id).await?;
        if changes.is_empty() {
            return Ok(request);
        }

        let request = self
            .requests
            .update(id, changes)
            .await?
            .ok_or_else(|| DomainError::not_found("PropertyRequest"))?;
        tracing::info!(
            request_id = id,
            status = %request.status,
            event = "property_request_updated",
            "Updated property request"
        );
        Ok(request)
    }

    pub async fn delete_request(&self, caller: UserId, id: RequestId) -> DomainResult<()> {
        self.ensure_owner(caller, id).await?;
        if !self.requests.soft_delete(id).await? {
            return Err(DomainError::not_found("PropertyRequest"));
        }
        tracing::info!(
            request_id = id,
            event = "property_request_deleted",
            "Soft-deleted property request"
        );
        Ok(())
    }
}
