use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202608240001_create_people::Migration),
            Box::new(migrations::m202608240002_create_attendance_entries::Migration),
        ]
    }
}
