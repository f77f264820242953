pub mod property;
pub mod property_request;
pub mod user;

pub use property::{MockPropertyRepository, PropertyRepository};
pub use property_request::{MockPropertyRequestRepository, PropertyRequestRepository};
pub use user::{MockUserRepository, UserRepository};
