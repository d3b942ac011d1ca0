use crate::{
    config::session::SessionConfig,
    error::{AppError, AppResult},
    models::{session, user, Session, SessionModel, User, UserModel},
    utils::{hash_password, verify_password},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
};

/// A valid bcrypt hash that matches no account. Verified against when login
/// hits an unknown email so the two failure cases take comparable time.
const DUMMY_HASH: &str = "$2a$10$N9qo8uLOickgx2ZMRZoMyeIjZAgcfl7p92ldGxad68LJZdL17lhWy";

pub struct AuthService {
    db: DatabaseConnection,
    config: SessionConfig,
}

impl AuthService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            config: SessionConfig::from_env(),
        }
    }

    /// Register a new user with a bcrypt-hashed password.
    ///
    /// Username and email are pre-checked for field-level errors; the unique
    /// indexes on the users table remain the authoritative guard against
    /// racing registrations.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> AppResult<UserModel> {
        if self.username_taken(username, None).await? {
            return Err(AppError::DuplicateUsername);
        }
        if self.email_taken(email, None).await? {
            return Err(AppError::DuplicateEmail);
        }

        let password_hash = hash_password(password)?;
        let now = chrono::Utc::now().naive_utc();

        let new_user = user::ActiveModel {
            username: sea_orm::ActiveValue::Set(username.to_string()),
            email: sea_orm::ActiveValue::Set(email.to_string()),
            password_hash: sea_orm::ActiveValue::Set(password_hash),
            image_file: sea_orm::ActiveValue::Set("default.jpg".to_string()),
            created_at: sea_orm::ActiveValue::Set(now),
            ..Default::default()
        };

        new_user.insert(&self.db).await.map_err(map_unique_violation)
    }

    /// Log a user in by email and password, establishing a session.
    ///
    /// Fails with `InvalidCredentials` for both unknown email and wrong
    /// password; never reveals which of the two was wrong.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        remember: bool,
    ) -> AppResult<(UserModel, SessionModel)> {
        let user = User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        let user = match user {
            Some(user) => user,
            None => {
                // Burn a hash check so unknown emails cost the same as wrong
                // passwords.
                let _ = verify_password(password, DUMMY_HASH);
                return Err(AppError::InvalidCredentials);
            }
        };

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        let session = self.create_session(user.id, remember).await?;
        Ok((user, session))
    }

    /// Resolve a session id back to its user. Returns None for unknown,
    /// invalid, or expired sessions; expired rows are deleted on sight.
    pub async fn current_user(&self, session_id: &str) -> AppResult<Option<UserModel>> {
        let session = match Session::find_by_id(session_id).one(&self.db).await? {
            Some(s) => s,
            None => return Ok(None),
        };

        if session.expires_at <= chrono::Utc::now().naive_utc() {
            let _ = Session::delete_by_id(session.id).exec(&self.db).await;
            return Ok(None);
        }

        Ok(User::find_by_id(session.user_id).one(&self.db).await?)
    }

    /// Invalidate a session immediately. Idempotent.
    pub async fn logout(&self, session_id: &str) -> AppResult<()> {
        Session::delete_by_id(session_id).exec(&self.db).await?;
        Ok(())
    }

    pub async fn get_user_by_id(&self, id: i32) -> AppResult<UserModel> {
        User::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<UserModel>> {
        Ok(User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?)
    }

    /// Overwrite the stored password hash after a verified reset, then
    /// revoke every live session for the user.
    pub async fn reset_password(&self, user_id: i32, new_password: &str) -> AppResult<()> {
        let user = self.get_user_by_id(user_id).await?;

        let new_hash = hash_password(new_password)?;
        let mut active: user::ActiveModel = user.into();
        active.password_hash = sea_orm::ActiveValue::Set(new_hash);
        active.update(&self.db).await?;

        self.revoke_all_user_sessions(user_id).await?;
        Ok(())
    }

    pub async fn revoke_all_user_sessions(&self, user_id: i32) -> AppResult<()> {
        Session::delete_many()
            .filter(session::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    pub async fn username_taken(&self, username: &str, exclude: Option<i32>) -> AppResult<bool> {
        let mut query = User::find().filter(user::Column::Username.eq(username));
        if let Some(id) = exclude {
            query = query.filter(user::Column::Id.ne(id));
        }
        Ok(query.count(&self.db).await? > 0)
    }

    pub async fn email_taken(&self, email: &str, exclude: Option<i32>) -> AppResult<bool> {
        let mut query = User::find().filter(user::Column::Email.eq(email));
        if let Some(id) = exclude {
            query = query.filter(user::Column::Id.ne(id));
        }
        Ok(query.count(&self.db).await? > 0)
    }

    async fn create_session(&self, user_id: i32, remember: bool) -> AppResult<SessionModel> {
        let now = chrono::Utc::now().naive_utc();
        let expires_at = now + self.config.lifetime(remember);

        let model = session::ActiveModel {
            id: sea_orm::ActiveValue::Set(uuid::Uuid::new_v4().to_string()),
            user_id: sea_orm::ActiveValue::Set(user_id),
            expires_at: sea_orm::ActiveValue::Set(expires_at),
            created_at: sea_orm::ActiveValue::Set(now),
        };

        Ok(model.insert(&self.db).await?)
    }
}

/// Translate a unique-index violation from a racing insert into the same
/// field-level error the pre-check produces.
fn map_unique_violation(e: sea_orm::DbErr) -> AppError {
    let msg = e.to_string();
    if msg.contains("duplicate key") || msg.contains("unique constraint") {
        if msg.contains("username") {
            return AppError::DuplicateUsername;
        }
        if msg.contains("email") {
            return AppError::DuplicateEmail;
        }
    }
    AppError::Database(e)
}
