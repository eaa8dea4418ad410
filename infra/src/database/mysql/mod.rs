//! MySQL implementations of the core trait seams.

pub mod identity_provider_impl;
pub mod otp_repository_impl;

pub use identity_provider_impl::MySqlIdentityProvider;
pub use otp_repository_impl::MySqlOtpRepository;
