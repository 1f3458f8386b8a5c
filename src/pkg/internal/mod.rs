pub mod adaptors;
pub mod cache;
pub mod email;
