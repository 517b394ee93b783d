use sea_orm_migration::prelude::*;

use crate::m20240601_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // The composite key is what makes a follow edge unique.
        manager
            .create_table(
                Table::create()
                    .table(Followers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Followers::FollowerId).uuid().not_null())
                    .col(ColumnDef::new(Followers::FollowedId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(Followers::FollowerId)
                            .col(Followers::FollowedId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-followers-follower_id")
                            .from(Followers::Table, Followers::FollowerId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-followers-followed_id")
                            .from(Followers::Table, Followers::FollowedId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Followers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Followers {
    Table,
    FollowerId,
    FollowedId,
}
