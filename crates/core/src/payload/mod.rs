//! Attribute payload construction

pub mod builder;
pub mod dates;

pub use builder::build_payload;
pub use dates::normalize_date;
