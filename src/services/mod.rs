//! Business logic services.

pub mod admin;
pub mod announcement;
pub mod assessment;
pub mod auth;
pub mod feedback;
pub mod risk;
pub mod template;
