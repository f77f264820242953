//! Property repository trait covering listings, their images and favorites.

use async_trait::async_trait;
use kloom_shared::types::{Page, PageRequest};

use crate::domain::entities::property::{
    Favorite, NewProperty, NewPropertyImage, Property, PropertyChanges, PropertyFilter,
    PropertyId, PropertyImage,
};
use crate::domain::entities::user::UserId;
use crate::errors::DomainError;

/// Repository trait for Property persistence operations
///
/// Reads only ever see active listings; a soft-deleted property behaves
/// as if it did not exist.
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Persist a new listing and return it with its generated id
    async fn create(&self, property: NewProperty) -> Result<Property, DomainError>;

    async fn find_by_id(&self, id: PropertyId) -> Result<Option<Property>, DomainError>;

    /// Page through active listings in insertion order
    ///
    /// `total` counts every listing matching `filter`, independent of the
    /// requested window.
    async fn list(
        &self,
        filter: &PropertyFilter,
        page: PageRequest,
    ) -> Result<Page<Property>, DomainError>;

    /// Apply a partial update; `Ok(None)` when no active listing has the id
    async fn update(
        &self,
        id: PropertyId,
        changes: PropertyChanges,
    ) -> Result<Option<Property>, DomainError>;

    /// Returns `false` when the listing is missing or already deleted
    async fn soft_delete(&self, id: PropertyId) -> Result<bool, DomainError>;

    async fn add_image(&self, image: NewPropertyImage) -> Result<PropertyImage, DomainError>;

    /// Images of a listing, primary first, then oldest first
    async fn list_images(&self, property_id: PropertyId)
        -> Result<Vec<PropertyImage>, DomainError>;

    /// Bookmark a listing; returns the existing favorite when already present
    async fn add_favorite(
        &self,
        user_id: UserId,
        property_id: PropertyId,
    ) -> Result<Favorite, DomainError>;

    /// Returns `false` when there was nothing to remove
    async fn remove_favorite(
        &self,
        user_id: UserId,
        property_id: PropertyId,
    ) -> Result<bool, DomainError>;

    /// Active listings the user has bookmarked, most recent bookmark first
    async fn list_favorites(&self, user_id: UserId) -> Result<Vec<Property>, DomainError>;
}
