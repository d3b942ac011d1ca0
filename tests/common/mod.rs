#![allow(dead_code)]

use reqwest::{redirect::Policy, Client};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use sea_orm_migration::MigratorTrait;
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Once,
};

static INIT: Once = Once::new();
static MIGRATIONS_RAN: AtomicBool = AtomicBool::new(false);
static USER_COUNTER: AtomicUsize = AtomicUsize::new(0);

pub const TEST_PASSWORD: &str = "test_password_123";

fn init_env() {
    INIT.call_once(|| {
        dotenv::dotenv().ok();
        std::env::set_var(
            "SECRET_KEY",
            "integration_test_secret_that_is_at_least_32_characters_long",
        );
        let config = inklet::config::secret::SecretConfig::from_env().unwrap();
        let _ = inklet::services::reset_token::init_secret_config(config);
    });
}

pub struct TestApp {
    pub addr: String,
    pub db: DatabaseConnection,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.addr, path)
    }

    /// A fresh browser: its own cookie jar, redirects left to the test.
    pub fn new_client(&self) -> Client {
        build_client()
    }
}

fn build_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .build()
        .expect("Failed to build test client")
}

pub async fn spawn_app() -> TestApp {
    init_env();

    let database_url = std::env::var("TEST_DATABASE_URL")
        .unwrap_or_else(|_| std::env::var("DATABASE_URL").expect("DATABASE_URL must be set"));

    let db = sea_orm::Database::connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    // Run migrations only once globally (using atomic bool for thread safety)
    if !MIGRATIONS_RAN.swap(true, Ordering::SeqCst) {
        inklet::migration::Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");
    }

    let email_service = inklet::services::email::EmailService::from_env();

    let app = inklet::routes::create_routes()
        .layer(axum::extract::Extension(db.clone()))
        .layer(axum::extract::Extension(email_service));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        addr: format!("http://{}", addr),
        db,
        client: build_client(),
    }
}

/// A username no other test in the run can collide with (kept under the
/// 20-character limit).
pub fn unique_username(prefix: &str) -> String {
    let counter = USER_COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{}_{}_{}", prefix, std::process::id() % 100_000, counter)
}

pub fn email_for(username: &str) -> String {
    format!("{}@test.com", username)
}

/// Register a user through the form and return their row id.
pub async fn register_user(app: &TestApp, username: &str) -> i32 {
    let resp = app
        .client
        .post(app.url("/register"))
        .form(&[
            ("username", username),
            ("email", &email_for(username)),
            ("password", TEST_PASSWORD),
            ("confirm_password", TEST_PASSWORD),
        ])
        .send()
        .await
        .expect("Failed to register user");

    assert_eq!(
        resp.status(),
        303,
        "registration for '{}' did not redirect",
        username
    );

    find_user_id(&app.db, username).await
}

/// Log `client` in as `username` through the login form.
pub async fn login_user(app: &TestApp, client: &Client, username: &str) {
    let resp = client
        .post(app.url("/login"))
        .form(&[("email", email_for(username).as_str()), ("password", TEST_PASSWORD)])
        .send()
        .await
        .expect("Failed to log in");

    assert_eq!(resp.status(), 303, "login for '{}' did not redirect", username);
}

pub async fn find_user_id(db: &DatabaseConnection, username: &str) -> i32 {
    inklet::models::User::find()
        .filter(inklet::models::user::Column::Username.eq(username))
        .one(db)
        .await
        .expect("Failed to query user")
        .unwrap_or_else(|| panic!("User '{}' not found", username))
        .id
}

/// Insert a post directly, with an explicit creation time.
pub async fn seed_post(
    db: &DatabaseConnection,
    user_id: i32,
    title: &str,
    created_at: chrono::NaiveDateTime,
) -> i32 {
    let model = inklet::models::post::ActiveModel {
        user_id: sea_orm::ActiveValue::Set(user_id),
        title: sea_orm::ActiveValue::Set(title.to_string()),
        content: sea_orm::ActiveValue::Set(format!("Content of {}", title)),
        created_at: sea_orm::ActiveValue::Set(created_at),
        ..Default::default()
    };
    model.insert(db).await.expect("Failed to seed post").id
}
