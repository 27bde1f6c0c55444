//! Member accounts: registration, credentials, profile.

pub mod data;
pub mod models;

pub use data::MemberData;
pub use models::Member;
