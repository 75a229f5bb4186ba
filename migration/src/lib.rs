pub use sea_orm_migration::prelude::*;
mod m20260302_101500_catalog_taxonomy;
mod m20260302_103000_catalog_associations;
mod m20260410_090000_feedback;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260302_101500_catalog_taxonomy::Migration),
            Box::new(m20260302_103000_catalog_associations::Migration),
            Box::new(m20260410_090000_feedback::Migration),
        ]
    }
}
