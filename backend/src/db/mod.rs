pub mod amenities;
pub mod connection;
pub mod memory;
pub mod migrations;
pub mod places;
pub mod repository;
pub mod reviews;
pub mod users;

pub use amenities::PgAmenityRepository;
pub use connection::{DatabaseConfig, get_db_pool};
pub use memory::{InMemoryPlaceRepository, InMemoryRepository};
pub use places::PgPlaceRepository;
pub use repository::{DuplicateKey, PlaceRepository, Repository, ReviewRepository, is_duplicate};
pub use reviews::PgReviewRepository;
pub use users::PgUserRepository;
