// =============================================================================
// HBnB Backend Constants
// =============================================================================
// Field limits, auth settings and server defaults used across the backend.

// =============================================================================
// USER LIMITS
// =============================================================================

/// Maximum length (in characters) of a user's first or last name
pub const MAX_USER_NAME_LENGTH: usize = 50;

/// Minimum length (in characters) of a plaintext password
pub const MIN_PASSWORD_LENGTH: usize = 8;

// =============================================================================
// PLACE LIMITS
// =============================================================================

/// Maximum length (in characters) of a place title
pub const MAX_PLACE_TITLE_LENGTH: usize = 100;

/// Minimum price per night
pub const MIN_PLACE_PRICE: f64 = 0.0;

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

// =============================================================================
// REVIEW LIMITS
// =============================================================================

pub const MIN_REVIEW_RATING: i32 = 1;
pub const MAX_REVIEW_RATING: i32 = 5;

// =============================================================================
// AMENITY LIMITS
// =============================================================================

/// Maximum length (in characters) of an amenity name
pub const MAX_AMENITY_NAME_LENGTH: usize = 50;

// =============================================================================
// AUTH CONFIGURATION
// =============================================================================

/// Issuer written into every access token
pub const JWT_ISSUER: &str = "hbnb";

/// Access token lifetime if not specified in environment
pub const DEFAULT_JWT_EXPIRY_MINUTES: i64 = 60;

/// Signing key used when JWT_SECRET_KEY is unset (development only)
pub const DEV_JWT_SECRET: &str = "hbnb-dev-secret-change-me";

/// Length of the generated password for seeded admin accounts
pub const GENERATED_PASSWORD_LENGTH: usize = 20;

// =============================================================================
// SERVER CONFIGURATION
// =============================================================================

/// Default server port if not specified in environment
pub const DEFAULT_SERVER_PORT: u16 = 5000;

/// Default database pool size
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Seconds to wait for a pooled connection before failing the request
pub const DB_ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// Log directives used when RUST_LOG is unset
pub const DEFAULT_LOG_FILTER: &str = "hbnb=info,tower_http=debug,server=debug,create_admin=info";

/// Prefix every REST resource is mounted under
pub const API_PREFIX: &str = "/api/v1";
