mod common;

use sea_orm::{ConnectionTrait, Statement};

fn article_count(body: &str) -> usize {
    body.matches("<article").count()
}

fn title_pos(body: &str, title: &str) -> usize {
    body.find(&format!("<h2>{}</h2>", title))
        .unwrap_or_else(|| panic!("title '{}' not found in page", title))
}

/// The whole listing contract in one place: page size, ordering, empty
/// out-of-range pages, per-author filtering, and the deterministic
/// tie-break for equal creation timestamps.
#[tokio::test]
async fn listing_pagination_contract() {
    let app = common::spawn_app().await;

    // This test owns the posts table; clear anything left behind.
    app.db
        .execute(Statement::from_string(
            sea_orm::DatabaseBackend::Postgres,
            "TRUNCATE TABLE posts".to_string(),
        ))
        .await
        .expect("Failed to truncate posts");

    let alice = common::unique_username("alice");
    let alice_id = common::register_user(&app, &alice).await;

    // 12 posts, one second apart, oldest first.
    let base = chrono::Utc::now().naive_utc() - chrono::Duration::hours(1);
    for i in 0..12 {
        common::seed_post(
            &app.db,
            alice_id,
            &format!("{}_p{}", alice, i),
            base + chrono::Duration::seconds(i),
        )
        .await;
    }

    // Page 1: exactly 5 posts, newest first.
    let body = app
        .client
        .get(app.url("/home"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(article_count(&body), 5);
    let p11 = title_pos(&body, &format!("{}_p11", alice));
    let p7 = title_pos(&body, &format!("{}_p7", alice));
    assert!(p11 < p7, "newest post should come first");

    // Page 3: the remaining 2.
    let body = app
        .client
        .get(app.url("/home?page=3"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(article_count(&body), 2);
    title_pos(&body, &format!("{}_p1", alice));
    title_pos(&body, &format!("{}_p0", alice));

    // Page 4: out of range is an empty page, not an error.
    let resp = app.client.get(app.url("/home?page=4")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(article_count(&resp.text().await.unwrap()), 0);

    // Per-author listing follows the same contract.
    let body = app
        .client
        .get(app.url(&format!("/user/{}", alice)))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(article_count(&body), 5);

    let resp = app
        .client
        .get(app.url(&format!("/user/{}?page=3", alice)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(article_count(&resp.text().await.unwrap()), 2);

    // Unknown author is a 404.
    let resp = app
        .client
        .get(app.url(&format!("/user/ghost_{}", std::process::id())))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    // Equal timestamps: the id tie-break keeps pagination stable, so
    // walking the pages sees every post exactly once, newest id first.
    let bob = common::unique_username("bob");
    let bob_id = common::register_user(&app, &bob).await;
    let tied = chrono::Utc::now().naive_utc() - chrono::Duration::minutes(5);
    for i in 0..6 {
        common::seed_post(&app.db, bob_id, &format!("{}_t{}", bob, i), tied).await;
    }

    let mut seen = Vec::new();
    for page in 1..=2 {
        let body = app
            .client
            .get(app.url(&format!("/user/{}?page={}", bob, page)))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        let mut on_page: Vec<(usize, String)> = (0..6)
            .filter_map(|i| {
                let title = format!("{}_t{}", bob, i);
                body.find(&format!("<h2>{}</h2>", title))
                    .map(|pos| (pos, title))
            })
            .collect();
        on_page.sort();
        seen.extend(on_page.into_iter().map(|(_, title)| title));
    }
    // Every post exactly once, in descending id order.
    let expected: Vec<String> = (0..6).rev().map(|i| format!("{}_t{}", bob, i)).collect();
    assert_eq!(seen, expected);
}
