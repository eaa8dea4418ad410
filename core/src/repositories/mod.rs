pub mod otp;

pub use otp::{MockOtpRepository, OtpRepository};
