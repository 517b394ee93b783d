//! SeaORM repository implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, Condition, DbConn, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, QueryTrait, Select, Set,
};
use uuid::Uuid;

use microblog_core::domain::{AuthoredPost, Page, PageRequest, User};
use microblog_core::error::RepoError;
use microblog_core::ports::{FollowRepository, PostRepository, UserRepository};

use super::base::{SeaOrmRepository, map_db_err};
use super::entity::follow::{self, Entity as FollowEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};

/// SeaORM user repository.
pub type SeaOrmUserRepository = SeaOrmRepository<UserEntity>;

/// SeaORM post repository.
pub type SeaOrmPostRepository = SeaOrmRepository<PostEntity>;

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(%username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask email for logging to avoid PII in logs
        let masked = match email.split_once('@') {
            Some((local, domain)) if local.chars().count() > 1 => {
                let first: String = local.chars().take(1).collect();
                format!("{}***@{}", first, domain)
            }
            Some((_, domain)) => format!("***@{}", domain),
            None => "***".to_string(),
        };
        tracing::debug!(user_email = %masked, "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn touch_last_seen(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), RepoError> {
        UserEntity::update_many()
            .col_expr(user::Column::LastSeen, Expr::value(at.fixed_offset()))
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }
}

impl SeaOrmPostRepository {
    /// Order `select` newest first, join in the authors and cut out one page.
    ///
    /// The id tiebreak keeps page boundaries stable between posts that share
    /// a timestamp. Pages past the end come back empty without a row query.
    async fn fetch_page(
        &self,
        select: Select<PostEntity>,
        page: PageRequest,
    ) -> Result<Page<AuthoredPost>, RepoError> {
        let paginator = select
            .order_by_desc(post::Column::Timestamp)
            .order_by_desc(post::Column::Id)
            .find_also_related(UserEntity)
            .paginate(&self.db, page.per_page());

        let total = paginator.num_items().await.map_err(map_db_err)?;
        if page.is_past(total) {
            return Ok(Page::new(Vec::new(), page, total));
        }

        let rows = paginator
            .fetch_page(page.page() - 1)
            .await
            .map_err(map_db_err)?;

        let items = rows
            .into_iter()
            .map(|(post, author)| AuthoredPost {
                post: post.into(),
                author: author.map(|u| u.username).unwrap_or_default(),
            })
            .collect();

        Ok(Page::new(items, page, total))
    }
}

#[async_trait]
impl PostRepository for SeaOrmPostRepository {
    async fn find_by_author(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<AuthoredPost>, RepoError> {
        let select = PostEntity::find().filter(post::Column::UserId.eq(user_id));
        self.fetch_page(select, page).await
    }

    async fn followed_posts(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<AuthoredPost>, RepoError> {
        // SELECT followed_id FROM followers WHERE follower_id = :user_id
        let followed = FollowEntity::find()
            .select_only()
            .column(follow::Column::FollowedId)
            .filter(follow::Column::FollowerId.eq(user_id))
            .into_query();

        let select = PostEntity::find().filter(
            Condition::any()
                .add(post::Column::UserId.in_subquery(followed))
                .add(post::Column::UserId.eq(user_id)),
        );
        self.fetch_page(select, page).await
    }

    async fn all_posts(&self, page: PageRequest) -> Result<Page<AuthoredPost>, RepoError> {
        self.fetch_page(PostEntity::find(), page).await
    }
}

/// SeaORM follow-graph repository.
pub struct SeaOrmFollowRepository {
    db: DbConn,
}

impl SeaOrmFollowRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FollowRepository for SeaOrmFollowRepository {
    async fn follow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, RepoError> {
        let edge = follow::ActiveModel {
            follower_id: Set(follower_id),
            followed_id: Set(followed_id),
        };

        let inserted = FollowEntity::insert(edge)
            .on_conflict(
                OnConflict::columns([follow::Column::FollowerId, follow::Column::FollowedId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(inserted > 0)
    }

    async fn unfollow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, RepoError> {
        let result = FollowEntity::delete_many()
            .filter(follow::Column::FollowerId.eq(follower_id))
            .filter(follow::Column::FollowedId.eq(followed_id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn is_following(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, RepoError> {
        let edge = FollowEntity::find_by_id((follower_id, followed_id))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(edge.is_some())
    }

    async fn followed_ids(&self, follower_id: Uuid) -> Result<Vec<Uuid>, RepoError> {
        let edges = FollowEntity::find()
            .filter(follow::Column::FollowerId.eq(follower_id))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(edges.into_iter().map(|e| e.followed_id).collect())
    }

    async fn followers_count(&self, user_id: Uuid) -> Result<u64, RepoError> {
        FollowEntity::find()
            .filter(follow::Column::FollowedId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }

    async fn following_count(&self, user_id: Uuid) -> Result<u64, RepoError> {
        FollowEntity::find()
            .filter(follow::Column::FollowerId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }
}
