//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub body: String,
    pub timestamp: DateTimeWithTimeZone,
    pub user_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for microblog_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            body: model.body,
            timestamp: model.timestamp.into(),
            user_id: model.user_id,
        }
    }
}

impl From<microblog_core::domain::Post> for ActiveModel {
    fn from(post: microblog_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            body: Set(post.body),
            timestamp: Set(post.timestamp.into()),
            user_id: Set(post.user_id),
        }
    }
}
