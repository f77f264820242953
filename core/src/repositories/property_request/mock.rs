//! In-memory implementation of PropertyRequestRepository

use async_trait::async_trait;
use chrono::Utc;
use kloom_shared::types::{Page, PageRequest};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::lifecycle::RecordState;
use crate::domain::entities::property_request::{
    NewPropertyRequest, PreferenceCriteria, PropertyRequest, PropertyRequestChanges,
    RequestFilter, RequestId, RequestPreference,
};
use crate::errors::DomainError;

use super::trait_::PropertyRequestRepository;

#[derive(Default)]
struct Store {
    requests: BTreeMap<RequestId, PropertyRequest>,
    next_request_id: RequestId,
    next_preference_id: i64,
}

impl Store {
    fn materialize(
        &mut self,
        request_id: RequestId,
        criteria: Vec<PreferenceCriteria>,
    ) -> Vec<RequestPreference> {
        criteria
            .into_iter()
            .map(|criteria| {
                let id = self.next_preference_id;
                self.next_preference_id += 1;
                RequestPreference {
                    id,
                    request_id,
                    criteria,
                }
            })
            .collect()
    }
}

/// Mock property request repository for testing
#[derive(Clone)]
pub struct MockPropertyRequestRepository {
    store: Arc<RwLock<Store>>,
}

impl MockPropertyRequestRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(Store {
                next_request_id: 1,
                next_preference_id: 1,
                ..Default::default()
            })),
        }
    }
}

impl Default for MockPropertyRequestRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PropertyRequestRepository for MockPropertyRequestRepository {
    async fn create(&self, request: NewPropertyRequest) -> Result<PropertyRequest, DomainError> {
        let mut store = self.store.write().await;
        let id = store.next_request_id;
        store.next_request_id += 1;

        let preferences = store.materialize(id, request.preferences);
        let request = PropertyRequest {
            id,
            franchise_id: request.franchise_id,
            attributes: request.attributes,
            status: request.status,
            state: RecordState::Active,
            created_at: Utc::now(),
            preferences,
        };
        store.requests.insert(id, request.clone());
        Ok(request)
    }

    async fn find_by_id(&self, id: RequestId) -> Result<Option<PropertyRequest>, DomainError> {
        let store = self.store.read().await;
        Ok(store.requests.get(&id).filter(|r| !r.is_deleted()).cloned())
    }

    async fn list(
        &self,
        filter: &RequestFilter,
        page: PageRequest,
    ) -> Result<Page<PropertyRequest>, DomainError> {
        let store = self.store.read().await;
        let matching = store
            .requests
            .values()
            .filter(|r| !r.is_deleted() && filter.matches(r))
            .cloned();
        Ok(page.slice(matching))
    }

    async fn update(
        &self,
        id: RequestId,
        mut changes: PropertyRequestChanges,
    ) -> Result<Option<PropertyRequest>, DomainError> {
        let mut store = self.store.write().await;
        if !matches!(store.requests.get(&id), Some(r) if !r.is_deleted()) {
            return Ok(None);
        }

        let preferences = changes
            .preferences
            .take()
            .map(|criteria| store.materialize(id, criteria));

        let Some(request) = store.requests.get_mut(&id) else {
            return Ok(None);
        };
        changes.apply_to(request);
        if let Some(preferences) = preferences {
            request.preferences = preferences;
        }
        Ok(Some(request.clone()))
    }

    async fn soft_delete(&self, id: RequestId) -> Result<bool, DomainError> {
        let mut store = self.store.write().await;
        match store.requests.get_mut(&id) {
            Some(request) if !request.is_deleted() => {
                request.mark_deleted();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
