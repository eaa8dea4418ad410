pub mod auth;

pub use auth::{ResetPasswordRequest, ResetPasswordResponse, SendCodeRequest, SendCodeResponse};
