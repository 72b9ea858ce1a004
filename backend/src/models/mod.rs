pub mod amenities;
pub mod places;
pub mod reviews;
pub mod users;
pub mod validation;

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub use amenities::{Amenity, AmenityResponse, AmenityUpdate};
pub use places::{Place, PlaceDetails, PlaceInput, PlaceOwner, PlaceResponse, PlaceUpdate};
pub use reviews::{Review, ReviewResponse, ReviewUpdate};
pub use users::{User, UserResponse, UserUpdate};
pub use validation::ValidationError;

/// A stored record addressable by id.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Human-readable type name used in error messages ("Place not found").
    const KIND: &'static str;

    /// Field names accepted by `Repository::get_by_attribute`.
    const ATTRIBUTES: &'static [&'static str];

    fn id(&self) -> Uuid;

    fn created_at(&self) -> DateTime<Utc>;

    /// String rendering of a named field, or `None` if it is not one of `ATTRIBUTES`.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Value no two stored records of this kind may share.
    fn unique_key(&self) -> Option<String> {
        None
    }
}
