//! Database models and DTOs for all domain entities.

pub mod announcement;
pub mod assessment;
pub mod feedback;
pub mod pagination;
pub mod template;
pub mod user;
