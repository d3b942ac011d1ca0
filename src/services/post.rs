use crate::{
    error::AppResult,
    models::{post, user, Post, PostModel, UserModel},
    response::Page,
    services::user::UserService,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

pub struct PostService {
    db: DatabaseConnection,
}

impl PostService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, user_id: i32, title: &str, content: &str) -> AppResult<PostModel> {
        let now = chrono::Utc::now().naive_utc();

        let new_post = post::ActiveModel {
            user_id: sea_orm::ActiveValue::Set(user_id),
            title: sea_orm::ActiveValue::Set(title.to_string()),
            content: sea_orm::ActiveValue::Set(content.to_string()),
            created_at: sea_orm::ActiveValue::Set(now),
            ..Default::default()
        };

        Ok(new_post.insert(&self.db).await?)
    }

    /// Global listing, newest first, with each post's author.
    ///
    /// Ordered by creation time descending with id descending as the
    /// tie-break, so pagination never duplicates or skips a post when
    /// timestamps collide. Out-of-range pages are empty, not errors.
    pub async fn list_recent(
        &self,
        page: u64,
        per_page: u64,
    ) -> AppResult<Page<(PostModel, Option<UserModel>)>> {
        let paginator = Post::find()
            .find_also_related(user::Entity)
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .paginate(&self.db, per_page);

        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok(Page::new(items, total, page, per_page))
    }

    /// Listing filtered to one author. Fails with `NotFound` if no user has
    /// that username; same ordering and pagination contract as `list_recent`.
    pub async fn list_by_author(
        &self,
        username: &str,
        page: u64,
        per_page: u64,
    ) -> AppResult<(UserModel, Page<PostModel>)> {
        let author = UserService::new(self.db.clone())
            .get_by_username(username)
            .await?;

        let paginator = Post::find()
            .filter(post::Column::UserId.eq(author.id))
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .paginate(&self.db, per_page);

        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((author, Page::new(items, total, page, per_page)))
    }
}
