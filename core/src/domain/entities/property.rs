//! Property listings, their images and user favorites.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::lifecycle::RecordState;
use super::user::UserId;
use crate::errors::ValidationError;

/// Store-generated property identifier
pub type PropertyId = i64;

/// Square meters in one pyeong (400/121 m², the legal definition)
pub const M2_PER_PYEONG: f64 = 400.0 / 121.0;

/// Market status of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum PropertyStatus {
    #[default]
    Available,
    Pending,
    Sold,
    Rented,
    OffMarket,
}

impl PropertyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyStatus::Available => "available",
            PropertyStatus::Pending => "pending",
            PropertyStatus::Sold => "sold",
            PropertyStatus::Rented => "rented",
            PropertyStatus::OffMarket => "offMarket",
        }
    }
}

impl fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(PropertyStatus::Available),
            "pending" => Ok(PropertyStatus::Pending),
            "sold" => Ok(PropertyStatus::Sold),
            "rented" => Ok(PropertyStatus::Rented),
            "offMarket" => Ok(PropertyStatus::OffMarket),
            _ => Err(ValidationError::InvalidFormat {
                field: "status".to_string(),
            }),
        }
    }
}

/// Descriptive attributes of a listing supplied by the agent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyAttributes {
    pub title: String,
    pub address: String,
    pub region_code: Option<String>,
    pub area_m2: Option<f64>,
    pub area_pyeong: Option<f64>,
    pub deposit: Option<i64>,
    pub monthly_rent: Option<i64>,
    pub sale_price: Option<i64>,
    pub management_fee: Option<i64>,
    pub floor: Option<i32>,
    pub building_type: Option<String>,
    pub year_built: Option<i32>,
    #[serde(default)]
    pub renovated: bool,
    pub available_from: Option<NaiveDate>,
}

impl PropertyAttributes {
    pub fn new(title: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            address: address.into(),
            ..Default::default()
        }
    }

    /// Fill whichever area unit is missing from the other one
    pub fn with_both_areas(mut self) -> Self {
        (self.area_m2, self.area_pyeong) = both_areas(self.area_m2, self.area_pyeong);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::required("title"));
        }
        if self.address.trim().is_empty() {
            return Err(ValidationError::required("address"));
        }
        validate_areas(self.area_m2, self.area_pyeong)
    }
}

fn round_area(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn both_areas(m2: Option<f64>, pyeong: Option<f64>) -> (Option<f64>, Option<f64>) {
    match (m2, pyeong) {
        (Some(m2), None) => (Some(m2), Some(round_area(m2 / M2_PER_PYEONG))),
        (None, Some(pyeong)) => (Some(round_area(pyeong * M2_PER_PYEONG)), Some(pyeong)),
        areas => areas,
    }
}

fn validate_areas(m2: Option<f64>, pyeong: Option<f64>) -> Result<(), ValidationError> {
    for (field, value) in [("area_m2", m2), ("area_pyeong", pyeong)] {
        if matches!(value, Some(area) if area < 0.0) {
            return Err(ValidationError::OutOfRange {
                field: field.to_string(),
                min: "0".to_string(),
                max: "unbounded".to_string(),
            });
        }
    }
    Ok(())
}

/// Property entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,

    #[serde(flatten)]
    pub attributes: PropertyAttributes,

    pub status: PropertyStatus,

    pub state: RecordState,

    /// Owning agent
    pub agent_id: UserId,

    pub created_at: DateTime<Utc>,
}

impl Property {
    pub fn is_deleted(&self) -> bool {
        self.state.is_deleted()
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.agent_id == user_id
    }

    pub fn mark_deleted(&mut self) {
        self.state = RecordState::Deleted;
    }
}

/// Data for a listing that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewProperty {
    pub agent_id: UserId,
    pub attributes: PropertyAttributes,
    pub status: PropertyStatus,
}

impl NewProperty {
    /// New listings start out `available`
    pub fn new(agent_id: UserId, attributes: PropertyAttributes) -> Self {
        Self {
            agent_id,
            attributes: attributes.with_both_areas(),
            status: PropertyStatus::default(),
        }
    }

    pub fn into_property(self, id: PropertyId, created_at: DateTime<Utc>) -> Property {
        Property {
            id,
            attributes: self.attributes,
            status: self.status,
            state: RecordState::Active,
            agent_id: self.agent_id,
            created_at,
        }
    }
}

/// Partial update of a listing; `None` leaves the field unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyChanges {
    pub title: Option<String>,
    pub address: Option<String>,
    pub region_code: Option<String>,
    pub area_m2: Option<f64>,
    pub area_pyeong: Option<f64>,
    pub deposit: Option<i64>,
    pub monthly_rent: Option<i64>,
    pub sale_price: Option<i64>,
    pub management_fee: Option<i64>,
    pub floor: Option<i32>,
    pub building_type: Option<String>,
    pub year_built: Option<i32>,
    pub renovated: Option<bool>,
    pub available_from: Option<NaiveDate>,
    pub status: Option<PropertyStatus>,
}

impl PropertyChanges {
    pub fn is_empty(&self) -> bool {
        *self == PropertyChanges::default()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if matches!(&self.title, Some(title) if title.trim().is_empty()) {
            return Err(ValidationError::required("title"));
        }
        if matches!(&self.address, Some(address) if address.trim().is_empty()) {
            return Err(ValidationError::required("address"));
        }
        validate_areas(self.area_m2, self.area_pyeong)
    }

    /// Derive the other area unit when only one is being changed
    pub fn with_both_areas(mut self) -> Self {
        (self.area_m2, self.area_pyeong) = both_areas(self.area_m2, self.area_pyeong);
        self
    }

    pub fn apply_to(self, property: &mut Property) {
        let changes = self.with_both_areas();
        let attrs = &mut property.attributes;
        if let Some(title) = changes.title {
            attrs.title = title;
        }
        if let Some(address) = changes.address {
            attrs.address = address;
        }
        if changes.region_code.is_some() {
            attrs.region_code = changes.region_code;
        }
        if changes.area_m2.is_some() {
            attrs.area_m2 = changes.area_m2;
        }
        if changes.area_pyeong.is_some() {
            attrs.area_pyeong = changes.area_pyeong;
        }
        if changes.deposit.is_some() {
            attrs.deposit = changes.deposit;
        }
        if changes.monthly_rent.is_some() {
            attrs.monthly_rent = changes.monthly_rent;
        }
        if changes.sale_price.is_some() {
            attrs.sale_price = changes.sale_price;
        }
        if changes.management_fee.is_some() {
            attrs.management_fee = changes.management_fee;
        }
        if changes.floor.is_some() {
            attrs.floor = changes.floor;
        }
        if changes.building_type.is_some() {
            attrs.building_type = changes.building_type;
        }
        if changes.year_built.is_some() {
            attrs.year_built = changes.year_built;
        }
        if let Some(renovated) = changes.renovated {
            attrs.renovated = renovated;
        }
        if changes.available_from.is_some() {
            attrs.available_from = changes.available_from;
        }
        if let Some(status) = changes.status {
            property.status = status;
        }
    }
}

/// Listing enriched with the owning agent's contact fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyDetail {
    #[serde(flatten)]
    pub property: Property,
    pub agent_name: Option<String>,
    pub agent_phone: Option<String>,
}

/// Optional filters for listing queries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyFilter {
    pub agent_id: Option<UserId>,
    pub status: Option<PropertyStatus>,
}

impl PropertyFilter {
    pub fn by_agent(agent_id: UserId) -> Self {
        Self {
            agent_id: Some(agent_id),
            ..Default::default()
        }
    }

    pub fn matches(&self, property: &Property) -> bool {
        self.agent_id.map_or(true, |id| property.agent_id == id)
            && self.status.map_or(true, |status| property.status == status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyImage {
    pub id: i64,
    pub property_id: PropertyId,
    pub url: String,
    pub is_primary: bool,
    pub caption: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPropertyImage {
    pub property_id: PropertyId,
    pub url: String,
    pub is_primary: bool,
    pub caption: Option<String>,
}

impl NewPropertyImage {
    pub fn into_image(self, id: i64, created_at: DateTime<Utc>) -> PropertyImage {
        PropertyImage {
            id,
            property_id: self.property_id,
            url: self.url,
            is_primary: self.is_primary,
            caption: self.caption,
            created_at,
        }
    }
}

/// A user's bookmark on a listing, unique per (user, property)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: i64,
    pub user_id: UserId,
    pub property_id: PropertyId,
    pub created_at: DateTime<Utc>,
}
