//! Domain entities representing core business objects.

pub mod lifecycle;
pub mod property;
pub mod property_request;
pub mod user;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use lifecycle::RecordState;
pub use property::{
    Favorite, NewProperty, NewPropertyImage, Property, PropertyAttributes, PropertyChanges,
    PropertyDetail, PropertyFilter, PropertyId, PropertyImage, PropertyStatus, M2_PER_PYEONG,
};
pub use property_request::{
    NewPropertyRequest, PreferenceCriteria, PropertyRequest, PropertyRequestChanges,
    RequestAttributes, RequestFilter, RequestId, RequestPreference, RequestStatus,
};
pub use user::{
    AgentProfile, FranchiseProfile, NewUser, OwnerProfile, Profile, User, UserChanges, UserId,
    UserRole,
};
