//! gRPC server implementations for Gatekeep.

pub mod auth_svc;
pub mod grpc_util;
pub mod public_key_svc;


pub use auth_svc::AuthServiceImpl;
pub use public_key_svc::PublicKeyServiceImpl;
