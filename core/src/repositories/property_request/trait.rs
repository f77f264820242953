use async_trait::async_trait;
use kloom_shared::types::{Page, PageRequest};

use crate::domain::entities::property_request::{
    NewPropertyRequest, PropertyRequest, PropertyRequestChanges, RequestFilter, RequestId,
};
use crate::errors::DomainError;

/// Repository trait for franchise sourcing requests
///
/// Requests are always returned with their preference rows. A request and
/// its preferences are written atomically.
#[async_trait]
pub trait PropertyRequestRepository: Send + Sync {
    async fn create(&self, request: NewPropertyRequest) -> Result<PropertyRequest, DomainError>;

    async fn find_by_id(&self, id: RequestId) -> Result<Option<PropertyRequest>, DomainError>;

    /// Page through active requests in insertion order
    async fn list(
        &self,
        filter: &RequestFilter,
        page: PageRequest,
    ) -> Result<Page<PropertyRequest>, DomainError>;

    /// Apply a partial update; supplied preferences replace the stored set
    async fn update(
        &self,
        id: RequestId,
        changes: PropertyRequestChanges,
    ) -> Result<Option<PropertyRequest>, DomainError>;

    async fn soft_delete(&self, id: RequestId) -> Result<bool, DomainError>;
}
