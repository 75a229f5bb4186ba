pub mod catalog;
pub mod feedback;
pub mod feedback_requests;
pub mod health;
pub mod import;
pub mod universities;
