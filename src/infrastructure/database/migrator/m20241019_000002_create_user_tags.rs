//! Create user_tags table migration

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
                    .table(UserTags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserTags::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(UserTags::UserId).string().not_null())
                    .col(ColumnDef::new(UserTags::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(UserTags::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_tags_user_id")
                            .from(UserTags::Table, UserTags::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_tags_user_id")
                    .table(UserTags::Table)
                    .col(UserTags::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserTags::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum UserTags {
    Table,
    Id,
    UserId,
    Name,
    CreatedAt,
}
