//! Account orchestration: registration, authentication and authorized
//! mutation.

mod error;
mod users;


pub use error::ServiceError;
pub use users::{ProfileChanges, Registration, UserService};
