pub mod catalog_import_repo;
pub mod catalog_repo;
pub mod emails_repo;
pub mod feedback_repo;
pub mod university_repo;
