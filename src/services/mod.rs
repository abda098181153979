// Service exports
pub mod cache;
pub mod sessions;
pub mod shelter_api;

pub use cache::PoolCache;
pub use sessions::SessionStore;
pub use shelter_api::{ShelterApiClient, ShelterApiError};
