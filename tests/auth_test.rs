mod common;

#[tokio::test]
async fn register_then_login() {
    let app = common::spawn_app().await;
    let username = common::unique_username("alice");
    common::register_user(&app, &username).await;

    let client = app.new_client();
    common::login_user(&app, &client, &username).await;

    // Session cookie now lets the client see the account page.
    let resp = client.get(app.url("/account")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains(&username));
}

#[tokio::test]
async fn register_redirects_to_login_with_notice() {
    let app = common::spawn_app().await;
    let username = common::unique_username("bea");

    let resp = app
        .client
        .post(app.url("/register"))
        .form(&[
            ("username", username.as_str()),
            ("email", common::email_for(&username).as_str()),
            ("password", common::TEST_PASSWORD),
            ("confirm_password", common::TEST_PASSWORD),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(resp.headers()["location"], "/login");

    // The flash notice shows once on the login page, then clears.
    let client = app.new_client();
    let resp = client
        .post(app.url("/register"))
        .form(&[
            ("username", common::unique_username("beb").as_str()),
            ("email", common::email_for(&common::unique_username("beb2")).as_str()),
            ("password", common::TEST_PASSWORD),
            ("confirm_password", common::TEST_PASSWORD),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 303);
    let body = client
        .get(app.url("/login"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Your account has been created!"));
    let body = client
        .get(app.url("/login"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(!body.contains("Your account has been created!"));
}

#[tokio::test]
async fn register_duplicate_username_fails() {
    let app = common::spawn_app().await;
    let username = common::unique_username("bob");
    common::register_user(&app, &username).await;

    let resp = app
        .client
        .post(app.url("/register"))
        .form(&[
            ("username", username.as_str()),
            ("email", "elsewhere@test.com"),
            ("password", common::TEST_PASSWORD),
            ("confirm_password", common::TEST_PASSWORD),
        ])
        .send()
        .await
        .unwrap();

    // Re-rendered form with the error inline on the username field.
    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("That username is taken"));
}

#[tokio::test]
async fn register_duplicate_email_fails() {
    let app = common::spawn_app().await;
    let username = common::unique_username("carol");
    common::register_user(&app, &username).await;

    let other = common::unique_username("caro2");
    let resp = app
        .client
        .post(app.url("/register"))
        .form(&[
            ("username", other.as_str()),
            ("email", common::email_for(&username).as_str()),
            ("password", common::TEST_PASSWORD),
            ("confirm_password", common::TEST_PASSWORD),
        ])
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("That email is taken"));

    // No record was created for the rejected registration.
    use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
    let count = inklet::models::User::find()
        .filter(inklet::models::user::Column::Username.eq(other.as_str()))
        .count(&app.db)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn register_password_mismatch_fails() {
    let app = common::spawn_app().await;
    let username = common::unique_username("dora");

    let resp = app
        .client
        .post(app.url("/register"))
        .form(&[
            ("username", username.as_str()),
            ("email", common::email_for(&username).as_str()),
            ("password", common::TEST_PASSWORD),
            ("confirm_password", "something_else_123"),
        ])
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Passwords must match"));
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = common::spawn_app().await;
    let username = common::unique_username("eve");
    common::register_user(&app, &username).await;

    // Wrong password for a real account
    let resp = app
        .client
        .post(app.url("/login"))
        .form(&[
            ("email", common::email_for(&username).as_str()),
            ("password", "wrong_password_123"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let wrong_password_body = resp.text().await.unwrap();
    assert!(wrong_password_body.contains("Login Unsuccessful"));

    // Unknown email
    let resp = app
        .client
        .post(app.url("/login"))
        .form(&[
            ("email", "nobody-here@test.com"),
            ("password", "wrong_password_123"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let unknown_email_body = resp.text().await.unwrap();
    assert!(unknown_email_body.contains("Login Unsuccessful"));
}

#[tokio::test]
async fn logout_invalidates_session() {
    let app = common::spawn_app().await;
    let username = common::unique_username("finn");
    common::register_user(&app, &username).await;

    let client = app.new_client();
    common::login_user(&app, &client, &username).await;

    let resp = client.get(app.url("/account")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let resp = client.get(app.url("/logout")).send().await.unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(resp.headers()["location"], "/home");

    let resp = client.get(app.url("/account")).send().await.unwrap();
    assert_eq!(resp.status(), 303);
}

#[tokio::test]
async fn logged_in_user_is_bounced_off_auth_pages() {
    let app = common::spawn_app().await;
    let username = common::unique_username("gus");
    common::register_user(&app, &username).await;

    let client = app.new_client();
    common::login_user(&app, &client, &username).await;

    for path in ["/register", "/login", "/reset_password"] {
        let resp = client.get(app.url(path)).send().await.unwrap();
        assert_eq!(resp.status(), 303, "GET {} should redirect", path);
        assert_eq!(resp.headers()["location"], "/home");
    }
}
