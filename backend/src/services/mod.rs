pub mod facade;
pub mod jwt;
pub mod policy;

pub use facade::{HbnbFacade, NewReview, NewUser};
pub use jwt::{Claims, JwtService};
pub use policy::AuthUser;
