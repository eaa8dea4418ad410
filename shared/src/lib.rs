//! # MyVoice974 Shared
//!
//! Cross-cutting helpers shared by the MyVoice974 backend crates:
//! environment-driven configuration, wire response types, and small
//! validation utilities.

pub mod config;
pub mod types;
pub mod utils;
