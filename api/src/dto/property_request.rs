use chrono::{DateTime, NaiveDate, Utc};
use kloom_core::domain::entities::{
    PreferenceCriteria, PropertyRequest, PropertyRequestChanges, RequestAttributes, RequestFilter,
    RequestId, RequestPreference, RequestStatus, UserId,
};
use kloom_shared::types::PageRequest;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::default_limit;

/// One set of preference criteria attached to a request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PreferenceRequest {
    #[validate(length(max = 50))]
    pub property_type: Option<String>,
    #[validate(length(max = 50))]
    pub transaction_type: Option<String>,
    #[validate(length(max = 50))]
    pub category: Option<String>,
    #[validate(range(min = 0.0))]
    pub min_area: Option<f64>,
    #[validate(range(min = 0.0))]
    pub max_area: Option<f64>,
    pub min_floor: Option<i32>,
    #[validate(range(min = 0))]
    pub min_rooms: Option<i32>,
    #[validate(range(min = 0))]
    pub min_toilets: Option<i32>,
    #[validate(range(min = 0))]
    pub min_parking: Option<i32>,
    pub required_facilities: Option<String>,
    pub required_surroundings: Option<String>,
    #[validate(range(min = 0))]
    pub min_budget: Option<i64>,
    #[validate(range(min = 0))]
    pub max_budget: Option<i64>,
    #[validate(range(min = 0))]
    pub min_deposit: Option<i64>,
    #[validate(range(min = 0))]
    pub max_deposit: Option<i64>,
    #[validate(range(min = 0))]
    pub min_rent: Option<i64>,
    #[validate(range(min = 0))]
    pub max_rent: Option<i64>,
    #[validate(range(min = 0))]
    pub max_maintenance: Option<i64>,
    #[validate(range(min = 0))]
    pub max_premium: Option<i64>,
    pub notes: Option<String>,
    #[validate(length(max = 255))]
    pub tags: Option<String>,
}

impl From<PreferenceRequest> for PreferenceCriteria {
    fn from(request: PreferenceRequest) -> Self {
        PreferenceCriteria {
            property_type: request.property_type,
            transaction_type: request.transaction_type,
            category: request.category,
            min_area: request.min_area,
            max_area: request.max_area,
            min_floor: request.min_floor,
            min_rooms: request.min_rooms,
            min_toilets: request.min_toilets,
            min_parking: request.min_parking,
            required_facilities: request.required_facilities,
            required_surroundings: request.required_surroundings,
            min_budget: request.min_budget,
            max_budget: request.max_budget,
            min_deposit: request.min_deposit,
            max_deposit: request.max_deposit,
            min_rent: request.min_rent,
            max_rent: request.max_rent,
            max_maintenance: request.max_maintenance,
            max_premium: request.max_premium,
            notes: request.notes,
            tags: request.tags,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePropertyRequestBody {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub region_preference: String,
    #[validate(range(min = 0))]
    pub radius_km: Option<i32>,
    #[validate(length(max = 20))]
    pub urgency_level: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub contact_name: String,
    #[validate(length(min = 1, max = 20))]
    pub contact_phone: String,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    #[validate(nested)]
    pub preferences: Vec<PreferenceRequest>,
}

impl CreatePropertyRequestBody {
    /// Split into the request row and its preference rows
    pub fn into_parts(self) -> (RequestAttributes, Vec<PreferenceCriteria>) {
        let attributes = RequestAttributes {
            title: self.title,
            description: self.description,
            region_preference: self.region_preference,
            radius_km: self.radius_km,
            urgency_level: self.urgency_level,
            contact_name: self.contact_name,
            contact_phone: self.contact_phone,
            due_date: self.due_date,
        };
        let preferences = self.preferences.into_iter().map(Into::into).collect();
        (attributes, preferences)
    }
}

/// Partial update; `preferences`, when present, replaces the whole set
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePropertyRequestBody {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub region_preference: Option<String>,
    #[validate(range(min = 0))]
    pub radius_km: Option<i32>,
    #[validate(length(max = 20))]
    pub urgency_level: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub contact_name: Option<String>,
    #[validate(length(min = 1, max = 20))]
    pub contact_phone: Option<String>,
    pub status: Option<RequestStatus>,
    pub due_date: Option<NaiveDate>,
    #[validate(nested)]
    pub preferences: Option<Vec<PreferenceRequest>>,
}

impl From<UpdatePropertyRequestBody> for PropertyRequestChanges {
    fn from(body: UpdatePropertyRequestBody) -> Self {
        PropertyRequestChanges {
            title: body.title,
            description: body.description,
            region_preference: body.region_preference,
            radius_km: body.radius_km,
            urgency_level: body.urgency_level,
            contact_name: body.contact_name,
            contact_phone: body.contact_phone,
            status: body.status,
            due_date: body.due_date,
            preferences: body
                .preferences
                .map(|preferences| preferences.into_iter().map(Into::into).collect()),
        }
    }
}

/// `GET /property-requests` query string
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RequestListQuery {
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: u64,
    pub franchise_id: Option<UserId>,
    pub status: Option<RequestStatus>,
}

impl RequestListQuery {
    pub fn page(&self) -> PageRequest {
        PageRequest::new(self.skip, self.limit)
    }

    pub fn filter(&self) -> RequestFilter {
        RequestFilter {
            franchise_id: self.franchise_id,
            status: self.status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyRequestResponse {
    pub id: RequestId,
    pub franchise_id: UserId,
    #[serde(flatten)]
    pub attributes: RequestAttributes,
    pub status: RequestStatus,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub preferences: Vec<RequestPreference>,
}

impl From<PropertyRequest> for PropertyRequestResponse {
    fn from(request: PropertyRequest) -> Self {
        PropertyRequestResponse {
            id: request.id,
            is_deleted: request.is_deleted(),
            franchise_id: request.franchise_id,
            attributes: request.attributes,
            status: request.status,
            created_at: request.created_at,
            preferences: request.preferences,
        }
    }
}
