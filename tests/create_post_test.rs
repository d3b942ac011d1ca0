mod common;

#[tokio::test]
async fn new_post_requires_login() {
    let app = common::spawn_app().await;

    let resp = app.client.get(app.url("/post/new")).send().await.unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(resp.headers()["location"], "/login?next=%2Fpost%2Fnew");
}

#[tokio::test]
async fn created_post_shows_in_listings() {
    let app = common::spawn_app().await;
    let username = common::unique_username("mona");
    common::register_user(&app, &username).await;

    let client = app.new_client();
    common::login_user(&app, &client, &username).await;

    let title = format!("{} first post", username);
    let resp = client
        .post(app.url("/post/new"))
        .form(&[("title", title.as_str()), ("content", "Hello, world.")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(resp.headers()["location"], "/home");

    let body = client
        .get(app.url("/home"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Your post has been created!"));
    assert!(body.contains(&title));

    let body = client
        .get(app.url(&format!("/user/{}", username)))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains(&title));
}

#[tokio::test]
async fn overlong_title_fails_inline() {
    let app = common::spawn_app().await;
    let username = common::unique_username("nils");
    common::register_user(&app, &username).await;

    let client = app.new_client();
    common::login_user(&app, &client, &username).await;

    let title = "x".repeat(101);
    let resp = client
        .post(app.url("/post/new"))
        .form(&[("title", title.as_str()), ("content", "body")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Title must be between 1 and 100 characters"));
}

#[tokio::test]
async fn post_markup_is_escaped() {
    let app = common::spawn_app().await;
    let username = common::unique_username("olga");
    common::register_user(&app, &username).await;

    let client = app.new_client();
    common::login_user(&app, &client, &username).await;

    let resp = client
        .post(app.url("/post/new"))
        .form(&[
            ("title", "<script>alert(1)</script>"),
            ("content", "safe content"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 303);

    let body = client
        .get(app.url("/home"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(!body.contains("<script>alert(1)</script>"));
}
