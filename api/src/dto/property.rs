use chrono::{DateTime, NaiveDate, Utc};
use kloom_core::domain::entities::{
    Property, PropertyAttributes, PropertyChanges, PropertyDetail, PropertyFilter, PropertyId,
    PropertyStatus, UserId,
};
use kloom_core::services::AddImage;
use kloom_shared::types::PageRequest;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::default_limit;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePropertyRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1, max = 500))]
    pub address: String,
    #[validate(length(max = 10))]
    pub region_code: Option<String>,
    #[validate(range(min = 0.0))]
    pub area_m2: Option<f64>,
    #[validate(range(min = 0.0))]
    pub area_pyeong: Option<f64>,
    #[validate(range(min = 0))]
    pub deposit: Option<i64>,
    #[validate(range(min = 0))]
    pub monthly_rent: Option<i64>,
    #[validate(range(min = 0))]
    pub sale_price: Option<i64>,
    #[validate(range(min = 0))]
    pub management_fee: Option<i64>,
    pub floor: Option<i32>,
    #[validate(length(max = 50))]
    pub building_type: Option<String>,
    pub year_built: Option<i32>,
    #[serde(default)]
    pub renovated: bool,
    pub available_from: Option<NaiveDate>,
}

impl From<CreatePropertyRequest> for PropertyAttributes {
    fn from(request: CreatePropertyRequest) -> Self {
        PropertyAttributes {
            title: request.title,
            address: request.address,
            region_code: request.region_code,
            area_m2: request.area_m2,
            area_pyeong: request.area_pyeong,
            deposit: request.deposit,
            monthly_rent: request.monthly_rent,
            sale_price: request.sale_price,
            management_fee: request.management_fee,
            floor: request.floor,
            building_type: request.building_type,
            year_built: request.year_built,
            renovated: request.renovated,
            available_from: request.available_from,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePropertyRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 500))]
    pub address: Option<String>,
    #[validate(length(max = 10))]
    pub region_code: Option<String>,
    #[validate(range(min = 0.0))]
    pub area_m2: Option<f64>,
    #[validate(range(min = 0.0))]
    pub area_pyeong: Option<f64>,
    #[validate(range(min = 0))]
    pub deposit: Option<i64>,
    #[validate(range(min = 0))]
    pub monthly_rent: Option<i64>,
    #[validate(range(min = 0))]
    pub sale_price: Option<i64>,
    #[validate(range(min = 0))]
    pub management_fee: Option<i64>,
    pub floor: Option<i32>,
    #[validate(length(max = 50))]
    pub building_type: Option<String>,
    pub year_built: Option<i32>,
    pub renovated: Option<bool>,
    pub available_from: Option<NaiveDate>,
    pub status: Option<PropertyStatus>,
}

impl From<UpdatePropertyRequest> for PropertyChanges {
    fn from(request: UpdatePropertyRequest) -> Self {
        PropertyChanges {
            title: request.title,
            address: request.address,
            region_code: request.region_code,
            area_m2: request.area_m2,
            area_pyeong: request.area_pyeong,
            deposit: request.deposit,
            monthly_rent: request.monthly_rent,
            sale_price: request.sale_price,
            management_fee: request.management_fee,
            floor: request.floor,
            building_type: request.building_type,
            year_built: request.year_built,
            renovated: request.renovated,
            available_from: request.available_from,
            status: request.status,
        }
    }
}

/// `GET /properties` query string
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PropertyListQuery {
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: u64,
    pub agent_id: Option<UserId>,
    pub status: Option<PropertyStatus>,
}

impl PropertyListQuery {
    pub fn page(&self) -> PageRequest {
        PageRequest::new(self.skip, self.limit)
    }

    pub fn filter(&self) -> PropertyFilter {
        PropertyFilter {
            agent_id: self.agent_id,
            status: self.status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddImageRequest {
    #[validate(url, length(max = 500))]
    pub url: String,
    #[serde(default)]
    pub is_primary: bool,
    #[validate(length(max = 255))]
    pub caption: Option<String>,
}

impl From<AddImageRequest> for AddImage {
    fn from(request: AddImageRequest) -> Self {
        AddImage {
            url: request.url,
            is_primary: request.is_primary,
            caption: request.caption,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyResponse {
    pub id: PropertyId,
    #[serde(flatten)]
    pub attributes: PropertyAttributes,
    pub status: PropertyStatus,
    pub is_deleted: bool,
    pub agent_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl From<Property> for PropertyResponse {
    fn from(property: Property) -> Self {
        PropertyResponse {
            id: property.id,
            is_deleted: property.is_deleted(),
            attributes: property.attributes,
            status: property.status,
            agent_id: property.agent_id,
            created_at: property.created_at,
        }
    }
}

/// Listing plus the agent's contact fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyDetailResponse {
    #[serde(flatten)]
    pub property: PropertyResponse,
    pub agent_name: Option<String>,
    pub agent_phone: Option<String>,
}

impl From<PropertyDetail> for PropertyDetailResponse {
    fn from(detail: PropertyDetail) -> Self {
        PropertyDetailResponse {
            property: detail.property.into(),
            agent_name: detail.agent_name,
            agent_phone: detail.agent_phone,
        }
    }
}
