use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendCodeRequest {
    /// Email address to issue a passcode for. Optional so that an omitted
    /// field surfaces as "Email is required" instead of a parse error.
    #[validate(email(message = "Adresse email invalide."))]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    /// Email address the passcode was issued for
    pub email: Option<String>,

    /// 6-digit passcode; wrong lengths are indistinguishable from a wrong
    /// code on the wire
    #[validate(length(equal = 6, message = "Invalid or expired OTP"))]
    pub otp: Option<String>,

    /// New password, at least 6 characters
    #[validate(length(
        min = 6,
        message = "Le mot de passe doit contenir au moins 6 caractères."
    ))]
    pub new_password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCodeResponse {
    pub success: bool,

    /// Present and true only when the mail gateway is not configured and
    /// the code was written to the server log
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordResponse {
    pub success: bool,
}
