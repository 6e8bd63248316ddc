//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20241019_000001_create_users;
mod m20241019_000002_create_user_tags;
mod m20241019_000003_create_favorite_wallet_addresses;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20241019_000001_create_users::Migration),
            Box::new(m20241019_000002_create_user_tags::Migration),
            Box::new(m20241019_000003_create_favorite_wallet_addresses::Migration),
        ]
    }
}
