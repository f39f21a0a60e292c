//! PublicKeyService gRPC implementation.
//!
//! Hands out the verification key so other services can check tokens
//! locally instead of calling back per request.

use tonic::{Request, Response, Status};
use tracing::instrument;

use gatekeep_proto::v1::public_key_service_server::PublicKeyService;
use gatekeep_proto::v1::{GetPublicKeyRequest, GetPublicKeyResponse};

use crate::auth::jwt::TOKEN_ALGORITHM;
use crate::service::UserService;

pub struct PublicKeyServiceImpl {
    users: UserService,
}

impl PublicKeyServiceImpl {
    pub const fn new(users: UserService) -> Self {
        Self { users }
    }
}

#[tonic::async_trait]
impl PublicKeyService for PublicKeyServiceImpl {
    #[instrument(skip(self, _request), fields(rpc = "GetPublicKey"))]
    async fn get_public_key(
        &self,
        _request: Request<GetPublicKeyRequest>,
    ) -> Result<Response<GetPublicKeyResponse>, Status> {
        Ok(Response::new(GetPublicKeyResponse {
            public_key: self.users.public_key_base64(),
            algorithm: format!("{TOKEN_ALGORITHM:?}"),
        }))
    }
}
