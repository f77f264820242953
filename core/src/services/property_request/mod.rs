//! Property request service module: franchise sourcing requests.

mod service;

pub use service::PropertyRequestService;
