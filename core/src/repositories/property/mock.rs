//! In-memory implementation of PropertyRepository for tests and local wiring

use async_trait::async_trait;
use chrono::Utc;
use kloom_shared::types::{Page, PageRequest};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::property::{
    Favorite, NewProperty, NewPropertyImage, Property, PropertyChanges, PropertyFilter,
    PropertyId, PropertyImage,
};
use crate::domain::entities::user::UserId;
use crate::errors::DomainError;

use super::trait_::PropertyRepository;

#[derive(Default)]
struct Store {
    properties: BTreeMap<PropertyId, Property>,
    images: Vec<PropertyImage>,
    favorites: Vec<Favorite>,
    next_property_id: PropertyId,
    next_image_id: i64,
    next_favorite_id: i64,
}

impl Store {
    fn active(&self, id: PropertyId) -> Option<&Property> {
        self.properties.get(&id).filter(|p| !p.is_deleted())
    }
}

/// Mock property repository for testing
#[derive(Clone)]
pub struct MockPropertyRepository {
    store: Arc<RwLock<Store>>,
}

impl MockPropertyRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(Store {
                next_property_id: 1,
                next_image_id: 1,
                next_favorite_id: 1,
                ..Default::default()
            })),
        }
    }
}

impl Default for MockPropertyRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PropertyRepository for MockPropertyRepository {
    async fn create(&self, property: NewProperty) -> Result<Property, DomainError> {
        let mut store = self.store.write().await;
        let id = store.next_property_id;
        store.next_property_id += 1;

        let property = property.into_property(id, Utc::now());
        store.properties.insert(id, property.clone());
        Ok(property)
    }

    async fn find_by_id(&self, id: PropertyId) -> Result<Option<Property>, DomainError> {
        let store = self.store.read().await;
        Ok(store.active(id).cloned())
    }

    async fn list(
        &self,
        filter: &PropertyFilter,
        page: PageRequest,
    ) -> Result<Page<Property>, DomainError> {
        let store = self.store.read().await;
        let matching = store
            .properties
            .values()
            .filter(|p| !p.is_deleted() && filter.matches(p))
            .cloned();
        Ok(page.slice(matching))
    }

    async fn update(
        &self,
        id: PropertyId,
        changes: PropertyChanges,
    ) -> Result<Option<Property>, DomainError> {
        let mut store = self.store.write().await;
        match store.properties.get_mut(&id) {
            Some(property) if !property.is_deleted() => {
                changes.apply_to(property);
                Ok(Some(property.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn soft_delete(&self, id: PropertyId) -> Result<bool, DomainError> {
        let mut store = self.store.write().await;
        match store.properties.get_mut(&id) {
            Some(property) if !property.is_deleted() => {
                property.mark_deleted();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn add_image(&self, image: NewPropertyImage) -> Result<PropertyImage, DomainError> {
        let mut store = self.store.write().await;
        if store.active(image.property_id).is_none() {
            return Err(DomainError::not_found("Property"));
        }
        let id = store.next_image_id;
        store.next_image_id += 1;

        let image = image.into_image(id, Utc::now());
        store.images.push(image.clone());
        Ok(image)
    }

    async fn list_images(
        &self,
        property_id: PropertyId,
    ) -> Result<Vec<PropertyImage>, DomainError> {
        let store = self.store.read().await;
        let mut images: Vec<PropertyImage> = store
            .images
            .iter()
            .filter(|i| i.property_id == property_id)
            .cloned()
            .collect();
        images.sort_by_key(|i| (!i.is_primary, i.id));
        Ok(images)
    }

    async fn add_favorite(
        &self,
        user_id: UserId,
        property_id: PropertyId,
    ) -> Result<Favorite, DomainError> {
        let mut store = self.store.write().await;
        if let Some(existing) = store
            .favorites
            .iter()
            .find(|f| f.user_id == user_id && f.property_id == property_id)
        {
            return Ok(existing.clone());
        }

        let favorite = Favorite {
            id: store.next_favorite_id,
            user_id,
            property_id,
            created_at: Utc::now(),
        };
        store.next_favorite_id += 1;
        store.favorites.push(favorite.clone());
        Ok(favorite)
    }

    async fn remove_favorite(
        &self,
        user_id: UserId,
        property_id: PropertyId,
    ) -> Result<bool, DomainError> {
        let mut store = self.store.write().await;
        let before = store.favorites.len();
        store
            .favorites
            .retain(|f| !(f.user_id == user_id && f.property_id == property_id));
        Ok(store.favorites.len() < before)
    }

    async fn list_favorites(&self, user_id: UserId) -> Result<Vec<Property>, DomainError> {
        let store = self.store.read().await;
        Ok(store
            .favorites
            .iter()
            .rev()
            .filter(|f| f.user_id == user_id)
            .filter_map(|f| store.active(f.property_id).cloned())
            .collect())
    }
}
