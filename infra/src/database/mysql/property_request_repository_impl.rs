//! MySQL implementation of the PropertyRequestRepository trait.
//!
//! A request and its preference rows are written in one transaction.
//! Reads load the preferences of every returned request with a single
//! extra query.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlConnection, MySqlPool, QueryBuilder};

use kloom_core::domain::entities::{
    NewPropertyRequest, PreferenceCriteria, PropertyRequest, PropertyRequestChanges,
    RecordState, RequestAttributes, RequestFilter, RequestId, RequestPreference,
};
use kloom_core::errors::DomainError;
use kloom_core::repositories::PropertyRequestRepository;
use kloom_shared::types::{Page, PageRequest};

use super::scope::{ActiveScope, REQUESTS};
use super::{column, db_error, enum_column, inserted_id};

const REQUEST_COLUMNS: &str = "r.id, r.franchise_id, r.title, r.description, \
     r.region_preference, r.radius_km, r.urgency_level, r.contact_name, r.contact_phone, \
     r.status, r.due_date, r.is_deleted, r.created_at";

const PREFERENCE_COLUMNS: &str = "id, request_id, property_type, transaction_type, category, \
     min_area, max_area, min_floor, min_rooms, min_toilets, min_parking, required_facilities, \
     required_surroundings, min_budget, max_budget, min_deposit, max_deposit, min_rent, \
     max_rent, max_maintenance, max_premium, notes, tags";

/// MySQL implementation of PropertyRequestRepository
pub struct MySqlPropertyRequestRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlPropertyRequestRepository {
    /// Create a new MySQL property request repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_request(row: &MySqlRow) -> Result<PropertyRequest, DomainError> {
        let attributes = RequestAttributes {
            title: column(row, "title")?,
            description: column(row, "description")?,
            region_preference: column(row, "region_preference")?,
            radius_km: column(row, "radius_km")?,
            urgency_level: column(row, "urgency_level")?,
            contact_name: column(row, "contact_name")?,
            contact_phone: column(row, "contact_phone")?,
            due_date: column(row, "due_date")?,
        };

        Ok(PropertyRequest {
            id: column(row, "id")?,
            franchise_id: column(row, "franchise_id")?,
            attributes,
            status: enum_column(row, "status")?,
            state: RecordState::from_deleted_flag(column(row, "is_deleted")?),
            created_at: column(row, "created_at")?,
            preferences: Vec::new(),
        })
    }

    fn row_to_preference(row: &MySqlRow) -> Result<RequestPreference, DomainError> {
        let criteria = PreferenceCriteria {
            property_type: column(row, "property_type")?,
            transaction_type: column(row, "transaction_type")?,
            category: column(row, "category")?,
            min_area: column(row, "min_area")?,
            max_area: column(row, "max_area")?,
            min_floor: column(row, "min_floor")?,
            min_rooms: column(row, "min_rooms")?,
            min_toilets: column(row, "min_toilets")?,
            min_parking: column(row, "min_parking")?,
            required_facilities: column(row, "required_facilities")?,
            required_surroundings: column(row, "required_surroundings")?,
            min_budget: column(row, "min_budget")?,
            max_budget: column(row, "max_budget")?,
            min_deposit: column(row, "min_deposit")?,
            max_deposit: column(row, "max_deposit")?,
            min_rent: column(row, "min_rent")?,
            max_rent: column(row, "max_rent")?,
            max_maintenance: column(row, "max_maintenance")?,
            max_premium: column(row, "max_premium")?,
            notes: column(row, "notes")?,
            tags: column(row, "tags")?,
        };

        Ok(RequestPreference {
            id: column(row, "id")?,
            request_id: column(row, "request_id")?,
            criteria,
        })
    }

    fn push_filter(query: &mut QueryBuilder<'_, MySql>, filter: &RequestFilter) {
        if let Some(franchise_id) = filter.franchise_id {
            query.push(" AND r.franchise_id = ").push_bind(franchise_id);
        }
        if let Some(status) = filter.status {
            query.push(" AND r.status = ").push_bind(status.as_str());
        }
    }

    async fn insert_preferences(
        conn: &mut MySqlConnection,
        request_id: RequestId,
        preferences: Vec<PreferenceCriteria>,
    ) -> Result<(), DomainError> {
        if preferences.is_empty() {
            return Ok(());
        }

        let mut query = QueryBuilder::<MySql>::new(
            "INSERT INTO request_preferences (request_id, property_type, transaction_type, \
             category, min_area, max_area, min_floor, min_rooms, min_toilets, min_parking, \
             required_facilities, required_surroundings, min_budget, max_budget, min_deposit, \
             max_deposit, min_rent, max_rent, max_maintenance, max_premium, notes, tags) ",
        );
        query.push_values(preferences, |mut row, p| {
            row.push_bind(request_id)
                .push_bind(p.property_type)
                .push_bind(p.transaction_type)
                .push_bind(p.category)
                .push_bind(p.min_area)
                .push_bind(p.max_area)
                .push_bind(p.min_floor)
                .push_bind(p.min_rooms)
                .push_bind(p.min_toilets)
                .push_bind(p.min_parking)
                .push_bind(p.required_facilities)
                .push_bind(p.required_surroundings)
                .push_bind(p.min_budget)
                .push_bind(p.max_budget)
                .push_bind(p.min_deposit)
                .push_bind(p.max_deposit)
                .push_bind(p.min_rent)
                .push_bind(p.max_rent)
                .push_bind(p.max_maintenance)
                .push_bind(p.max_premium)
                .push_bind(p.notes)
                .push_bind(p.tags);
        });

        query
            .build()
            .execute(conn)
            .await
            .map_err(db_error("insert request preferences"))?;
        Ok(())
    }

    /// Fill in the preferences of each request, ordered by insertion
    async fn attach_preferences(
        &self,
        mut requests: Vec<PropertyRequest>,
    ) -> Result<Vec<PropertyRequest>, DomainError> {
        if requests.is_empty() {
            return Ok(requests);
        }

        let mut query = QueryBuilder::<MySql>::new(format!(
            "SELECT {} FROM request_preferences WHERE request_id IN (",
            PREFERENCE_COLUMNS
        ));
        {
            let mut ids = query.separated(", ");
            for request in &requests {
                ids.push_bind(request.id);
            }
        }
        query.push(") ORDER BY id");

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("load request preferences"))?;

        let mut grouped: HashMap<RequestId, Vec<RequestPreference>> = HashMap::new();
        for row in &rows {
            let preference = Self::row_to_preference(row)?;
            grouped
                .entry(preference.request_id)
                .or_default()
                .push(preference);
        }
        for request in &mut requests {
            request.preferences = grouped.remove(&request.id).unwrap_or_default();
        }
        Ok(requests)
    }
}

#[async_trait]
impl PropertyRequestRepository for MySqlPropertyRequestRepository {
    async fn create(&self, request: NewPropertyRequest) -> Result<PropertyRequest, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("begin transaction"))?;

        let attrs = &request.attributes;
        let result = sqlx::query(
            r#"
            INSERT INTO property_requests (
                franchise_id, title, description, region_preference, radius_km,
                urgency_level, contact_name, contact_phone, status, due_date, is_deleted
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, FALSE)
            "#,
        )
        .bind(request.franchise_id)
        .bind(&attrs.title)
        .bind(&attrs.description)
        .bind(&attrs.region_preference)
        .bind(attrs.radius_km)
        .bind(&attrs.urgency_level)
        .bind(&attrs.contact_name)
        .bind(&attrs.contact_phone)
        .bind(request.status.as_str())
        .bind(attrs.due_date)
        .execute(&mut *tx)
        .await
        .map_err(db_error("create property request"))?;

        let id = inserted_id(&result)?;
        Self::insert_preferences(&mut tx, id, request.preferences).await?;
        tx.commit().await.map_err(db_error("commit property request"))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            DomainError::internal("Created property request could not be read back")
        })
    }

    async fn find_by_id(&self, id: RequestId) -> Result<Option<PropertyRequest>, DomainError> {
        let mut query = REQUESTS.select(REQUEST_COLUMNS);
        query.push(" AND r.id = ").push_bind(id);

        let row = query
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("find property request"))?;
        let Some(row) = row else {
            return Ok(None);
        };

        let request = Self::row_to_request(&row)?;
        Ok(self.attach_preferences(vec![request]).await?.pop())
    }

    async fn list(
        &self,
        filter: &RequestFilter,
        page: PageRequest,
    ) -> Result<Page<PropertyRequest>, DomainError> {
        let mut count = REQUESTS.count();
        Self::push_filter(&mut count, filter);
        let total: i64 = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("count property requests"))?;

        let mut query = REQUESTS.select(REQUEST_COLUMNS);
        Self::push_filter(&mut query, filter);
        query
            .push(" ORDER BY r.id LIMIT ")
            .push_bind(page.limit_i64())
            .push(" OFFSET ")
            .push_bind(page.offset_i64());

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list property requests"))?;
        let requests = rows
            .iter()
            .map(Self::row_to_request)
            .collect::<Result<Vec<_>, _>>()?;

        let items = self.attach_preferences(requests).await?;
        Ok(Page::new(items, total.max(0) as u64))
    }

    async fn update(
        &self,
        id: RequestId,
        mut changes: PropertyRequestChanges,
    ) -> Result<Option<PropertyRequest>, DomainError> {
        let touches_row = changes.touches_request_row();
        let preferences = changes.preferences.take();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("begin transaction"))?;

        let locked: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM property_requests WHERE id = ? AND is_deleted = FALSE FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("lock property request"))?;
        if locked.is_none() {
            return Ok(None);
        }

        if touches_row {
            let mut query = REQUESTS.update();
            {
                let mut set = query.separated(", ");
                if let Some(title) = changes.title {
                    set.push("title = ").push_bind_unseparated(title);
                }
                if let Some(description) = changes.description {
                    set.push("description = ").push_bind_unseparated(description);
                }
                if let Some(region_preference) = changes.region_preference {
                    set.push("region_preference = ")
                        .push_bind_unseparated(region_preference);
                }
                if let Some(radius_km) = changes.radius_km {
                    set.push("radius_km = ").push_bind_unseparated(radius_km);
                }
                if let Some(urgency_level) = changes.urgency_level {
                    set.push("urgency_level = ")
                        .push_bind_unseparated(urgency_level);
                }
                if let Some(contact_name) = changes.contact_name {
                    set.push("contact_name = ").push_bind_unseparated(contact_name);
                }
                if let Some(contact_phone) = changes.contact_phone {
                    set.push("contact_phone = ")
                        .push_bind_unseparated(contact_phone);
                }
                if let Some(status) = changes.status {
                    set.push("status = ").push_bind_unseparated(status.as_str());
                }
                if let Some(due_date) = changes.due_date {
                    set.push("due_date = ").push_bind_unseparated(due_date);
                }
            }
            ActiveScope::push_active_id(&mut query, id);

            query
                .build()
                .execute(&mut *tx)
                .await
                .map_err(db_error("update property request"))?;
        }

        if let Some(preferences) = preferences {
            sqlx::query("DELETE FROM request_preferences WHERE request_id = ?")
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(db_error("clear request preferences"))?;
            Self::insert_preferences(&mut tx, id, preferences).await?;
        }

        tx.commit()
            .await
            .map_err(db_error("commit property request update"))?;

        self.find_by_id(id).await
    }

    async fn soft_delete(&self, id: RequestId) -> Result<bool, DomainError> {
        let result = REQUESTS
            .soft_delete(id)
            .build()
            .execute(&self.pool)
            .await
            .map_err(db_error("delete property request"))?;
        Ok(result.rows_affected() > 0)
    }
}
