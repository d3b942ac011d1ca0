use crate::{
    error::{AppError, AppResult},
    models::{user, User, UserModel},
    services::auth::AuthService,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

pub struct UserService {
    db: DatabaseConnection,
}

impl UserService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_by_username(&self, username: &str) -> AppResult<UserModel> {
        User::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Update the account's username and email.
    ///
    /// Duplicate checks exclude the user's own row, so keeping the current
    /// username or email is not a conflict.
    pub async fn update_account(
        &self,
        user_id: i32,
        username: &str,
        email: &str,
    ) -> AppResult<UserModel> {
        let auth = AuthService::new(self.db.clone());
        if auth.username_taken(username, Some(user_id)).await? {
            return Err(AppError::DuplicateUsername);
        }
        if auth.email_taken(email, Some(user_id)).await? {
            return Err(AppError::DuplicateEmail);
        }

        let existing = User::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: user::ActiveModel = existing.into();
        active.username = sea_orm::ActiveValue::Set(username.to_string());
        active.email = sea_orm::ActiveValue::Set(email.to_string());

        Ok(active.update(&self.db).await?)
    }
}
