//! Sourcing requests raised by franchise users, with their preference criteria.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::lifecycle::RecordState;
use super::user::UserId;
use crate::errors::ValidationError;

/// Store-generated request identifier
pub type RequestId = i64;

/// Progress of a sourcing request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::InProgress => "in_progress",
            RequestStatus::Completed => "completed",
            RequestStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RequestStatus::Pending),
            "in_progress" => Ok(RequestStatus::InProgress),
            "completed" => Ok(RequestStatus::Completed),
            "cancelled" => Ok(RequestStatus::Cancelled),
            _ => Err(ValidationError::InvalidFormat {
                field: "status".to_string(),
            }),
        }
    }
}

/// What the franchise is looking for; every criterion is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceCriteria {
    pub property_type: Option<String>,
    pub transaction_type: Option<String>,
    pub category: Option<String>,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
    pub min_floor: Option<i32>,
    pub min_rooms: Option<i32>,
    pub min_toilets: Option<i32>,
    pub min_parking: Option<i32>,
    pub required_facilities: Option<String>,
    pub required_surroundings: Option<String>,
    pub min_budget: Option<i64>,
    pub max_budget: Option<i64>,
    pub min_deposit: Option<i64>,
    pub max_deposit: Option<i64>,
    pub min_rent: Option<i64>,
    pub max_rent: Option<i64>,
    pub max_maintenance: Option<i64>,
    pub max_premium: Option<i64>,
    pub notes: Option<String>,
    pub tags: Option<String>,
}

impl PreferenceCriteria {
    /// Reject min/max pairs where the lower bound exceeds the upper bound
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let (Some(min), Some(max)) = (self.min_area, self.max_area) {
            if min > max {
                return Err(inverted("min_area", "max_area"));
            }
        }
        let money_ranges = [
            ("min_budget", self.min_budget, "max_budget", self.max_budget),
            ("min_deposit", self.min_deposit, "max_deposit", self.max_deposit),
            ("min_rent", self.min_rent, "max_rent", self.max_rent),
        ];
        for (min_field, min, max_field, max) in money_ranges {
            if let (Some(min), Some(max)) = (min, max) {
                if min > max {
                    return Err(inverted(min_field, max_field));
                }
            }
        }
        Ok(())
    }
}

fn inverted(min_field: &str, max_field: &str) -> ValidationError {
    ValidationError::InvertedRange {
        min_field: min_field.to_string(),
        max_field: max_field.to_string(),
    }
}

/// Stored preference row belonging to one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestPreference {
    pub id: i64,
    pub request_id: RequestId,
    #[serde(flatten)]
    pub criteria: PreferenceCriteria,
}

/// Descriptive attributes of a request supplied by the franchise
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestAttributes {
    pub title: String,
    pub description: Option<String>,
    pub region_preference: String,
    pub radius_km: Option<i32>,
    pub urgency_level: Option<String>,
    pub contact_name: String,
    pub contact_phone: String,
    pub due_date: Option<NaiveDate>,
}

impl RequestAttributes {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("title", &self.title),
            ("region_preference", &self.region_preference),
            ("contact_name", &self.contact_name),
            ("contact_phone", &self.contact_phone),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationError::required(field));
            }
        }
        check_radius(self.radius_km)
    }
}

fn check_radius(radius_km: Option<i32>) -> Result<(), ValidationError> {
    match radius_km {
        Some(radius) if radius < 0 => Err(ValidationError::OutOfRange {
            field: "radius_km".to_string(),
            min: "0".to_string(),
            max: "unbounded".to_string(),
        }),
        _ => Ok(()),
    }
}

/// Property request entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRequest {
    pub id: RequestId,

    /// Requesting franchise user
    pub franchise_id: UserId,

    #[serde(flatten)]
    pub attributes: RequestAttributes,

    pub status: RequestStatus,

    pub state: RecordState,

    pub created_at: DateTime<Utc>,

    pub preferences: Vec<RequestPreference>,
}

impl PropertyRequest {
    pub fn is_deleted(&self) -> bool {
        self.state.is_deleted()
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.franchise_id == user_id
    }

    pub fn mark_deleted(&mut self) {
        self.state = RecordState::Deleted;
    }
}

/// Data for a request that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewPropertyRequest {
    pub franchise_id: UserId,
    pub attributes: RequestAttributes,
    pub status: RequestStatus,
    pub preferences: Vec<PreferenceCriteria>,
}

impl NewPropertyRequest {
    /// New requests start out `pending`
    pub fn new(
        franchise_id: UserId,
        attributes: RequestAttributes,
        preferences: Vec<PreferenceCriteria>,
    ) -> Self {
        Self {
            franchise_id,
            attributes,
            status: RequestStatus::default(),
            preferences,
        }
    }
}

/// Partial update of a request; `None` leaves the field unchanged
///
/// `preferences: Some(..)` replaces the whole preference set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyRequestChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub region_preference: Option<String>,
    pub radius_km: Option<i32>,
    pub urgency_level: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub status: Option<RequestStatus>,
    pub due_date: Option<NaiveDate>,
    pub preferences: Option<Vec<PreferenceCriteria>>,
}

impl PropertyRequestChanges {
    pub fn is_empty(&self) -> bool {
        *self == PropertyRequestChanges::default()
    }

    /// Whether any column of the request row itself changes
    pub fn touches_request_row(&self) -> bool {
        PropertyRequestChanges {
            preferences: None,
            ..self.clone()
        } != PropertyRequestChanges::default()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("title", &self.title),
            ("region_preference", &self.region_preference),
            ("contact_name", &self.contact_name),
            ("contact_phone", &self.contact_phone),
        ];
        for (field, value) in required {
            if matches!(value, Some(value) if value.trim().is_empty()) {
                return Err(ValidationError::required(field));
            }
        }
        check_radius(self.radius_km)?;
        if let Some(preferences) = &self.preferences {
            for preference in preferences {
                preference.validate()?;
            }
        }
        Ok(())
    }

    /// Apply the row-level changes; preferences are handled by the store
    pub fn apply_to(self, request: &mut PropertyRequest) {
        let attrs = &mut request.attributes;
        if let Some(title) = self.title {
            attrs.title = title;
        }
        if self.description.is_some() {
            attrs.description = self.description;
        }
        if let Some(region_preference) = self.region_preference {
            attrs.region_preference = region_preference;
        }
        if self.radius_km.is_some() {
            attrs.radius_km = self.radius_km;
        }
        if self.urgency_level.is_some() {
            attrs.urgency_level = self.urgency_level;
        }
        if let Some(contact_name) = self.contact_name {
            attrs.contact_name = contact_name;
        }
        if let Some(contact_phone) = self.contact_phone {
            attrs.contact_phone = contact_phone;
        }
        if self.due_date.is_some() {
            attrs.due_date = self.due_date;
        }
        if let Some(status) = self.status {
            request.status = status;
        }
    }
}

/// Optional filters for request listings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestFilter {
    pub franchise_id: Option<UserId>,
    pub status: Option<RequestStatus>,
}

impl RequestFilter {
    pub fn matches(&self, request: &PropertyRequest) -> bool {
        self.franchise_id.map_or(true, |id| request.franchise_id == id)
            && self.status.map_or(true, |status| request.status == status)
    }
}
