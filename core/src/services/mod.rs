//! Business services containing domain logic and use cases.

pub mod property;
pub mod property_request;
pub mod user;

use kloom_shared::types::{PageRequest, MAX_LIMIT, MIN_LIMIT};

use crate::errors::ValidationError;

// Re-export commonly used types
pub use property::{AddImage, PropertyService};
pub use property_request::PropertyRequestService;
pub use user::{CreateUser, UpdateUser, UserService, UserServiceConfig};

/// Reject page sizes outside `MIN_LIMIT..=MAX_LIMIT`
pub(crate) fn ensure_valid_page(page: &PageRequest) -> Result<(), ValidationError> {
    if page.is_valid() {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field: "limit".to_string(),
            min: MIN_LIMIT.to_string(),
            max: MAX_LIMIT.to_string(),
        })
    }
}
