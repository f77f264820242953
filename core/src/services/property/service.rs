//! Property service enforcing listing ownership and agent-only creation.

use std::sync::Arc;

use kloom_shared::types::{Page, PageRequest};
use kloom_shared::utils::validation::is_valid_url;

use crate::domain::entities::property::{
    Favorite, NewProperty, NewPropertyImage, Property, PropertyAttributes, PropertyChanges,
    PropertyDetail, PropertyFilter, PropertyId, PropertyImage,
};
use crate::domain::entities::user::UserId;
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::{PropertyRepository, UserRepository};
use crate::services::ensure_valid_page;

/// Image attachment input
#[derive(Debug, Clone)]
pub struct AddImage {
    pub url: String,
    pub is_primary: bool,
    pub caption: Option<String>,
}

/// Service for managing property listings
pub struct PropertyService<P, U>
where
    P: PropertyRepository,
    U: UserRepository,
{
    properties: Arc<P>,
    users: Arc<U>,
}

impl<P, U> PropertyService<P, U>
where
    P: PropertyRepository,
    U: UserRepository,
{
    /// Create a new property service
    pub fn new(properties: Arc<P>, users: Arc<U>) -> Self {
        Self { properties, users }
    }

    /// Create a listing owned by `agent_id`
    ///
    /// The agent must be an active user with the agent role. New listings
    /// start out `available`.
    pub async fn create_property(
        &self,
        agent_id: UserId,
        attributes: PropertyAttributes,
    ) -> DomainResult<Property> {
        attributes.validate()?;

        let agent = self
            .users
            .find_by_id(agent_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;
        if !agent.is_agent() {
            tracing::warn!(
                user_id = agent_id,
                role = %agent.role,
                event = "property_create_denied",
                "Non-agent attempted to create a listing"
            );
            return Err(DomainError::unauthorized("Only agents can create properties"));
        }

        let property = self
            .properties
            .create(NewProperty::new(agent_id, attributes))
            .await?;
        tracing::info!(
            property_id = property.id,
            agent_id = agent_id,
            event = "property_created",
            "Created property listing"
        );
        Ok(property)
    }

    /// Fetch an active listing
    pub async fn get_property(&self, id: PropertyId) -> DomainResult<Property> {
        self.properties
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Property"))
    }

    /// Fetch an active listing with the owning agent's contact fields
    ///
    /// The contact fields are empty when the agent has been deleted.
    pub async fn get_property_detail(&self, id: PropertyId) -> DomainResult<PropertyDetail> {
        let property = self.get_property(id).await?;
        let agent = self.users.find_by_id(property.agent_id).await?;

        let (agent_name, agent_phone) = match agent {
            Some(agent) => (agent.name, agent.phone),
            None => (None, None),
        };
        Ok(PropertyDetail {
            property,
            agent_name,
            agent_phone,
        })
    }

    /// Page through active listings in insertion order
    pub async fn list_properties(
        &self,
        filter: PropertyFilter,
        page: PageRequest,
    ) -> DomainResult<Page<Property>> {
        ensure_valid_page(&page)?;
        let result = self.properties.list(&filter, page).await?;
        tracing::debug!(
            skip = page.skip,
            limit = page.limit,
            total = result.total,
            "Listed properties"
        );
        Ok(result)
    }

    /// Load a listing and check that `caller` is its agent
    pub async fn ensure_owner(&self, caller: UserId, id: PropertyId) -> DomainResult<Property> {
        let property = self.get_property(id).await?;
        if !property.is_owned_by(caller) {
            tracing::warn!(
                property_id = id,
                user_id = caller,
                event = "property_owner_mismatch",
                "Caller does not own the listing"
            );
            return Err(DomainError::unauthorized(
                "Only the listing agent can modify this property",
            ));
        }
        Ok(property)
    }

    /// Apply a partial update to a listing the caller owns
    pub async fn update_property(
        &self,
        caller: UserId,
        id: PropertyId,
        changes: PropertyChanges,
    ) -> DomainResult<Property> {
        changes.validate()?;
        let property = self.ensure_owner(caller, id).await?;
        if changes.is_empty() {
            return Ok(property);
        }

        let property = self
            .properties
            .update(id, changes)
            .await?
            .ok_or_else(|| DomainError::not_found("Property"))?;
        tracing::info!(property_id = id, event = "property_updated", "Updated property");
        Ok(property)
    }

    /// Soft-delete a listing the caller owns
    pub async fn delete_property(&self, caller: UserId, id: PropertyId) -> DomainResult<()> {
        self.ensure_owner(caller, id).await?;
        if !self.properties.soft_delete(id).await? {
            return Err(DomainError::not_found("Property"));
        }
        tracing::info!(property_id = id, event = "property_deleted", "Soft-deleted property");
        Ok(())
    }

    /// Attach an image to a listing the caller owns
    pub async fn add_image(
        &self,
        caller: UserId,
        property_id: PropertyId,
        image: AddImage,
    ) -> DomainResult<PropertyImage> {
        if !is_valid_url(&image.url) {
            return Err(ValidationError::InvalidUrl.into());
        }
        self.ensure_owner(caller, property_id).await?;

        self.properties
            .add_image(NewPropertyImage {
                property_id,
                url: image.url,
                is_primary: image.is_primary,
                caption: image.caption,
            })
            .await
    }

    /// Images of an active listing
    pub async fn list_images(&self, property_id: PropertyId) -> DomainResult<Vec<PropertyImage>> {
        self.get_property(property_id).await?;
        self.properties.list_images(property_id).await
    }

    /// Bookmark an active listing; repeating the call is a no-op
    pub async fn add_favorite(
        &self,
        user_id: UserId,
        property_id: PropertyId,
    ) -> DomainResult<Favorite> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;
        self.get_property(property_id).await?;

        self.properties.add_favorite(user_id, property_id).await
    }

    /// Remove a bookmark; removing a missing bookmark is a no-op
    pub async fn remove_favorite(
        &self,
        user_id: UserId,
        property_id: PropertyId,
    ) -> DomainResult<()> {
        let removed = self.properties.remove_favorite(user_id, property_id).await?;
        tracing::debug!(user_id = user_id, property_id = property_id, removed, "Removed favorite");
        Ok(())
    }

    /// Active listings the user has bookmarked
    pub async fn list_favorites(&self, user_id: UserId) -> DomainResult<Vec<Property>> {
        self.properties.list_favorites(user_id).await
    }
}
