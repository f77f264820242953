pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
mod mock;

pub use mock::MockPropertyRequestRepository;
pub use r#trait::PropertyRequestRepository;
