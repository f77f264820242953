//! MySQL implementation of the PropertyRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, QueryBuilder};

use kloom_core::domain::entities::{
    Favorite, NewProperty, NewPropertyImage, Property, PropertyAttributes, PropertyChanges,
    PropertyFilter, PropertyId, PropertyImage, RecordState, UserId,
};
use kloom_core::errors::DomainError;
use kloom_core::repositories::PropertyRepository;
use kloom_shared::types::{Page, PageRequest};

use super::scope::{ActiveScope, PROPERTIES};
use super::{column, db_error, enum_column, inserted_id};

const PROPERTY_COLUMNS: &str = "p.id, p.title, p.address, p.region_code, p.area_m2, \
     p.area_pyeong, p.deposit, p.monthly_rent, p.sale_price, p.management_fee, p.floor, \
     p.building_type, p.year_built, p.renovated, p.available_from, p.status, p.is_deleted, \
     p.agent_id, p.created_at";

const IMAGE_COLUMNS: &str = "id, property_id, url, is_primary, caption, created_at";

/// MySQL implementation of PropertyRepository
pub struct MySqlPropertyRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlPropertyRepository {
    /// Create a new MySQL property repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_property(row: &MySqlRow) -> Result<Property, DomainError> {
        let attributes = PropertyAttributes {
            title: column(row, "title")?,
            address: column(row, "address")?,
            region_code: column(row, "region_code")?,
            area_m2: column(row, "area_m2")?,
            area_pyeong: column(row, "area_pyeong")?,
            deposit: column(row, "deposit")?,
            monthly_rent: column(row, "monthly_rent")?,
            sale_price: column(row, "sale_price")?,
            management_fee: column(row, "management_fee")?,
            floor: column(row, "floor")?,
            building_type: column(row, "building_type")?,
            year_built: column(row, "year_built")?,
            renovated: column(row, "renovated")?,
            available_from: column(row, "available_from")?,
        };

        Ok(Property {
            id: column(row, "id")?,
            attributes,
            status: enum_column(row, "status")?,
            state: RecordState::from_deleted_flag(column(row, "is_deleted")?),
            agent_id: column(row, "agent_id")?,
            created_at: column(row, "created_at")?,
        })
    }

    fn row_to_image(row: &MySqlRow) -> Result<PropertyImage, DomainError> {
        Ok(PropertyImage {
            id: column(row, "id")?,
            property_id: column(row, "property_id")?,
            url: column(row, "url")?,
            is_primary: column(row, "is_primary")?,
            caption: column(row, "caption")?,
            created_at: column(row, "created_at")?,
        })
    }

    fn row_to_favorite(row: &MySqlRow) -> Result<Favorite, DomainError> {
        Ok(Favorite {
            id: column(row, "id")?,
            user_id: column(row, "user_id")?,
            property_id: column(row, "property_id")?,
            created_at: column(row, "created_at")?,
        })
    }

    fn push_filter(query: &mut QueryBuilder<'_, MySql>, filter: &PropertyFilter) {
        if let Some(agent_id) = filter.agent_id {
            query.push(" AND p.agent_id = ").push_bind(agent_id);
        }
        if let Some(status) = filter.status {
            query.push(" AND p.status = ").push_bind(status.as_str());
        }
    }
}

#[async_trait]
impl PropertyRepository for MySqlPropertyRepository {
    async fn create(&self, property: NewProperty) -> Result<Property, DomainError> {
        let attrs = &property.attributes;
        let result = sqlx::query(
            r#"
            INSERT INTO properties (
                title, address, region_code, area_m2, area_pyeong, deposit, monthly_rent,
                sale_price, management_fee, floor, building_type, year_built, renovated,
                available_from, status, is_deleted, agent_id
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, FALSE, ?)
            "#,
        )
        .bind(&attrs.title)
        .bind(&attrs.address)
        .bind(&attrs.region_code)
        .bind(attrs.area_m2)
        .bind(attrs.area_pyeong)
        .bind(attrs.deposit)
        .bind(attrs.monthly_rent)
        .bind(attrs.sale_price)
        .bind(attrs.management_fee)
        .bind(attrs.floor)
        .bind(&attrs.building_type)
        .bind(attrs.year_built)
        .bind(attrs.renovated)
        .bind(attrs.available_from)
        .bind(property.status.as_str())
        .bind(property.agent_id)
        .execute(&self.pool)
        .await
        .map_err(db_error("create property"))?;

        let id = inserted_id(&result)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::internal("Created property could not be read back"))
    }

    async fn find_by_id(&self, id: PropertyId) -> Result<Option<Property>, DomainError> {
        let mut query = PROPERTIES.select(PROPERTY_COLUMNS);
        query.push(" AND p.id = ").push_bind(id);

        let row = query
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("find property"))?;
        row.as_ref().map(Self::row_to_property).transpose()
    }

    async fn list(
        &self,
        filter: &PropertyFilter,
        page: PageRequest,
    ) -> Result<Page<Property>, DomainError> {
        let mut count = PROPERTIES.count();
        Self::push_filter(&mut count, filter);
        let total: i64 = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("count properties"))?;

        let mut query = PROPERTIES.select(PROPERTY_COLUMNS);
        Self::push_filter(&mut query, filter);
        query
            .push(" ORDER BY p.id LIMIT ")
            .push_bind(page.limit_i64())
            .push(" OFFSET ")
            .push_bind(page.offset_i64());

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list properties"))?;
        let items = rows
            .iter()
            .map(Self::row_to_property)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, total.max(0) as u64))
    }

    async fn update(
        &self,
        id: PropertyId,
        changes: PropertyChanges,
    ) -> Result<Option<Property>, DomainError> {
        let Some(current) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        if changes.is_empty() {
            return Ok(Some(current));
        }
        let changes = changes.with_both_areas();

        let mut query = PROPERTIES.update();
        {
            let mut set = query.separated(", ");
            if let Some(title) = changes.title {
                set.push("title = ").push_bind_unseparated(title);
            }
            if let Some(address) = changes.address {
                set.push("address = ").push_bind_unseparated(address);
            }
            if let Some(region_code) = changes.region_code {
                set.push("region_code = ")
                    .push_bind_unseparated(region_code);
            }
            if let Some(area_m2) = changes.area_m2 {
                set.push("area_m2 = ").push_bind_unseparated(area_m2);
            }
            if let Some(area_pyeong) = changes.area_pyeong {
                set.push("area_pyeong = ")
                    .push_bind_unseparated(area_pyeong);
            }
            if let Some(deposit) = changes.deposit {
                set.push("deposit = ").push_bind_unseparated(deposit);
            }
            if let Some(monthly_rent) = changes.monthly_rent {
                set.push("monthly_rent = ")
                    .push_bind_unseparated(monthly_rent);
            }
            if let Some(sale_price) = changes.sale_price {
                set.push("sale_price = ").push_bind_unseparated(sale_price);
            }
            if let Some(management_fee) = changes.management_fee {
                set.push("management_fee = ")
                    .push_bind_unseparated(management_fee);
            }
            if let Some(floor) = changes.floor {
                set.push("floor = ").push_bind_unseparated(floor);
            }
            if let Some(building_type) = changes.building_type {
                set.push("building_type = ")
                    .push_bind_unseparated(building_type);
            }
            if let Some(year_built) = changes.year_built {
                set.push("year_built = ").push_bind_unseparated(year_built);
            }
            if let Some(renovated) = changes.renovated {
                set.push("renovated = ").push_bind_unseparated(renovated);
            }
            if let Some(available_from) = changes.available_from {
                set.push("available_from = ")
                    .push_bind_unseparated(available_from);
            }
            if let Some(status) = changes.status {
                set.push("status = ").push_bind_unseparated(status.as_str());
            }
        }
        ActiveScope::push_active_id(&mut query, id);

        query
            .build()
            .execute(&self.pool)
            .await
            .map_err(db_error("update property"))?;

        self.find_by_id(id).await
    }

    async fn soft_delete(&self, id: PropertyId) -> Result<bool, DomainError> {
        let result = PROPERTIES
            .soft_delete(id)
            .build()
            .execute(&self.pool)
            .await
            .map_err(db_error("delete property"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn add_image(&self, image: NewPropertyImage) -> Result<PropertyImage, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO property_images (property_id, url, is_primary, caption)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(image.property_id)
        .bind(&image.url)
        .bind(image.is_primary)
        .bind(&image.caption)
        .execute(&self.pool)
        .await
        .map_err(db_error("add property image"))?;

        let id = inserted_id(&result)?;
        let row = sqlx::query(&format!(
            "SELECT {} FROM property_images WHERE id = ?",
            IMAGE_COLUMNS
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("read property image"))?;
        Self::row_to_image(&row)
    }

    async fn list_images(
        &self,
        property_id: PropertyId,
    ) -> Result<Vec<PropertyImage>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM property_images WHERE property_id = ? ORDER BY is_primary DESC, id",
            IMAGE_COLUMNS
        ))
        .bind(property_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list property images"))?;

        rows.iter().map(Self::row_to_image).collect()
    }

    async fn add_favorite(
        &self,
        user_id: UserId,
        property_id: PropertyId,
    ) -> Result<Favorite, DomainError> {
        // A repeated favorite keeps the original row and id
        sqlx::query(
            r#"
            INSERT INTO favorites (user_id, property_id)
            VALUES (?, ?)
            ON DUPLICATE KEY UPDATE user_id = user_id
            "#,
        )
        .bind(user_id)
        .bind(property_id)
        .execute(&self.pool)
        .await
        .map_err(db_error("add favorite"))?;

        let row = sqlx::query(
            "SELECT id, user_id, property_id, created_at FROM favorites \
             WHERE user_id = ? AND property_id = ?",
        )
        .bind(user_id)
        .bind(property_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("read favorite"))?;
        Self::row_to_favorite(&row)
    }

    async fn remove_favorite(
        &self,
        user_id: UserId,
        property_id: PropertyId,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = ? AND property_id = ?")
            .bind(user_id)
            .bind(property_id)
            .execute(&self.pool)
            .await
            .map_err(db_error("remove favorite"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_favorites(&self, user_id: UserId) -> Result<Vec<Property>, DomainError> {
        let mut query =
            PROPERTIES.select_joined(PROPERTY_COLUMNS, "JOIN favorites f ON f.property_id = p.id");
        query
            .push(" AND f.user_id = ")
            .push_bind(user_id)
            .push(" ORDER BY f.id DESC");

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list favorites"))?;
        rows.iter().map(Self::row_to_property).collect()
    }
}
