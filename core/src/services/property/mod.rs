//! Property service module: listings, images and favorites.

mod service;

pub use service::{AddImage, PropertyService};
