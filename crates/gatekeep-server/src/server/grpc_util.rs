//! Shared gRPC utility helpers.

use tonic::{Request, Status};
use tracing::error;

use gatekeep_proto::v1::UserProfile;

use crate::service::ServiceError;
use crate::storage::User;

/// Pull the bearer token out of the `authorization` metadata entry.
#[allow(clippy::result_large_err)]
pub fn bearer_token<T>(req: &Request<T>) -> Result<String, Status> {
    req.metadata()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(ToOwned::to_owned)
        .ok_or_else(|| Status::unauthenticated("Missing authorization header"))
}

/// Map a service failure onto a gRPC status.
///
/// Infrastructure detail is logged here and replaced with a generic
/// message; credential failures all read the same.
pub fn service_error_to_status(err: ServiceError) -> Status {
    match err {
        ServiceError::InvalidCredentials => Status::unauthenticated("Invalid credentials"),
        ServiceError::TokenInvalid(_) => Status::unauthenticated("Invalid token"),
        ServiceError::DuplicateLogin => Status::already_exists("Login already taken"),
        ServiceError::DuplicateEmail => Status::already_exists("Email already registered"),
        ServiceError::UserNotFound => Status::not_found("User not found"),
        ServiceError::NotAuthorized(_) => Status::permission_denied("Not authorized"),
        ServiceError::Store(e) => {
            error!(error = %e, "Store failure");
            Status::internal("Internal error")
        }
        ServiceError::Internal(msg) => {
            error!(error = %msg, "Internal failure");
            Status::internal("Internal error")
        }
    }
}

/// Reject empty required fields with `INVALID_ARGUMENT`.
#[allow(clippy::result_large_err)]
pub fn require(value: &str, field: &str) -> Result<(), Status> {
    if value.trim().is_empty() {
        return Err(Status::invalid_argument(format!("{field} is required")));
    }
    Ok(())
}

#[allow(clippy::result_large_err)]
pub fn require_email(value: &str) -> Result<(), Status> {
    require(value, "email")?;
    if !value.contains('@') {
        return Err(Status::invalid_argument("email is not a valid address"));
    }
    Ok(())
}

pub fn user_profile(user: &User) -> UserProfile {
    UserProfile {
        user_id: user.id,
        login: user.login.clone(),
        username: user.username.clone(),
        surname: user.surname.clone(),
        email: user.email.clone(),
        is_admin: user.is_admin,
    }
}
