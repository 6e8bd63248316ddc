//! Create favorite_wallet_addresses table migration
//!
//! Tag ids are stored as a JSON array; `position` keeps request order.

use sea_orm_migration::prelude::*;

use super::m20241019_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FavoriteWalletAddresses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FavoriteWalletAddresses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FavoriteWalletAddresses::UserId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FavoriteWalletAddresses::Position)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FavoriteWalletAddresses::WalletAddress)
                            .string_len(128)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FavoriteWalletAddresses::Tags)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorite_wallet_addresses_user_id")
                            .from(
                                FavoriteWalletAddresses::Table,
                                FavoriteWalletAddresses::UserId,
                            )
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_favorite_wallet_addresses_user_position")
                    .table(FavoriteWalletAddresses::Table)
                    .col(FavoriteWalletAddresses::UserId)
                    .col(FavoriteWalletAddresses::Position)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(FavoriteWalletAddresses::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum FavoriteWalletAddresses {
    Table,
    Id,
    UserId,
    Position,
    WalletAddress,
    Tags,
}
