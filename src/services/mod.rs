pub mod catalog_service;
pub mod feedback_service;
pub mod import_service;
pub mod university_service;
