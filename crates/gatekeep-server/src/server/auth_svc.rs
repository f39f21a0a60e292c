//! AuthService gRPC implementation.

use tonic::{Request, Response, Status};
use tracing::instrument;

use gatekeep_proto::v1::auth_service_server::AuthService;
use gatekeep_proto::v1::{
    DeleteUserRequest, DeleteUserResponse, LoginRequest, LoginResponse, RegisterRequest,
    RegisterResponse, UpdateUserRequest, UpdateUserResponse,
};

use super::grpc_util::{
    bearer_token, require, require_email, service_error_to_status, user_profile,
};
use crate::service::{ProfileChanges, Registration, UserService};

pub struct AuthServiceImpl {
    users: UserService,
}

impl AuthServiceImpl {
    pub const fn new(users: UserService) -> Self {
        Self { users }
    }
}

#[tonic::async_trait]
impl AuthService for AuthServiceImpl {
    #[instrument(skip(self, request), fields(rpc = "Register"))]
    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<RegisterResponse>, Status> {
        let req = request.into_inner();

        require(&req.login, "login")?;
        require(&req.username, "username")?;
        require(&req.surname, "surname")?;
        require(&req.password, "password")?;
        require_email(&req.email)?;

        let user = self
            .users
            .register_user(Registration {
                login: req.login,
                username: req.username,
                surname: req.surname,
                email: req.email,
                password: req.password,
            })
            .await
            .map_err(service_error_to_status)?;

        Ok(Response::new(RegisterResponse { user_id: user.id }))
    }

    #[instrument(skip(self, request), fields(rpc = "Login"))]
    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<LoginResponse>, Status> {
        let req = request.into_inner();

        require(&req.login, "login")?;
        require(&req.password, "password")?;

        let issued = self
            .users
            .authenticate_user(&req.login, &req.password)
            .await
            .map_err(service_error_to_status)?;

        Ok(Response::new(LoginResponse {
            token: issued.token,
            expires_at: issued.expires_at,
        }))
    }

    #[instrument(skip(self, request), fields(rpc = "UpdateUser"))]
    async fn update_user(
        &self,
        request: Request<UpdateUserRequest>,
    ) -> Result<Response<UpdateUserResponse>, Status> {
        let token = bearer_token(&request)?;
        let req = request.into_inner();

        require(&req.login, "login")?;
        if let Some(email) = req.email.as_deref() {
            require_email(email)?;
        }
        if let Some(password) = req.password.as_deref() {
            require(password, "password")?;
        }

        let user = self
            .users
            .update_user_by_login(
                &req.login,
                &token,
                ProfileChanges {
                    username: req.username,
                    surname: req.surname,
                    email: req.email,
                    password: req.password,
                    is_admin: req.is_admin,
                },
            )
            .await
            .map_err(service_error_to_status)?;

        Ok(Response::new(UpdateUserResponse {
            user: Some(user_profile(&user)),
        }))
    }

    #[instrument(skip(self, request), fields(rpc = "DeleteUser"))]
    async fn delete_user(
        &self,
        request: Request<DeleteUserRequest>,
    ) -> Result<Response<DeleteUserResponse>, Status> {
        let token = bearer_token(&request)?;
        let req = request.into_inner();

        require(&req.login, "login")?;

        self.users
            .delete_user_by_login(&req.login, &token)
            .await
            .map_err(service_error_to_status)?;

        Ok(Response::new(DeleteUserResponse { deleted: true }))
    }
}
