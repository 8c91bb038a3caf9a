use super::client::{ApiClient, ApiError};
use super::types::{SignInRequest, SignUpRequest, UserProfile};

pub const SIGN_UP_PATH: &str = "/auth/signup";
pub const SIGN_IN_PATH: &str = "/auth/signin";

impl ApiClient {
    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<UserProfile, ApiError> {
        log::info!("Creating account for {}", request.email);
        self.post_json(SIGN_UP_PATH, request).await
    }

    pub async fn sign_in(&self, request: &SignInRequest) -> Result<UserProfile, ApiError> {
        log::info!("Signing in {}", request.email);
        self.post_json(SIGN_IN_PATH, request).await
    }
}
