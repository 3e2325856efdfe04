
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};
use test_utils::*;

#[actix_rt::test]
async fn counts_views_per_slug() {
    let app = TestApp::spawn().await;
    app.write_post_file("hello-world", "---\ntitle: \"Hello\"\nstatus: \"published\"\n---\nBody\n");

    for expected in 1..=3 {
        let response = app
            .client
            .post(app.url("/api/views"))
            .json(&json!({ "slug": "hello-world" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["slug"], "hello-world");
        assert_eq!(body["views"], expected);
        assert_eq!(body["message"], "View count incremented");
    }

    let current: Value = app
        .client
        .get(app.url("/api/views?slug=hello-world"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(current, json!({ "slug": "hello-world", "views": 3 }));

    let unseen: Value = app.client.get(app.url("/api/views?slug=other")).send().await.unwrap().json().await.unwrap();
    assert_eq!(unseen["views"], 0);
}

#[actix_rt::test]
async fn views_of_unknown_or_draft_posts_are_not_counted() {
    let app = TestApp::spawn().await;
    app.write_post_file("draft", "---\ntitle: \"Draft\"\nstatus: \"draft\"\n---\nBody\n");

    for slug in ["no-such-post-1", "no-such-post-2", "draft"] {
        let response = app
            .client
            .post(app.url("/api/views"))
            .json(&json!({ "slug": slug }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    let unknown: Value = app
        .client
        .get(app.url("/api/views?slug=no-such-post-1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(unknown["views"], 0);

    let dashboard: Value = app
        .admin(Method::GET, "/api/admin/dashboard")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(dashboard["topViewed"], json!([]));
}

#[actix_rt::test]
async fn slug_is_required() {
    let app = TestApp::spawn().await;

    let post = app.client.post(app.url("/api/views")).json(&json!({})).send().await.unwrap();
    assert_eq!(post.status(), StatusCode::BAD_REQUEST);

    let get = app.client.get(app.url("/api/views")).send().await.unwrap();
    assert_eq!(get.status(), StatusCode::BAD_REQUEST);
    let body: Value = get.json().await.unwrap();
    assert_eq!(body["error"], "Missing parameter: slug");
}

#[actix_rt::test]
async fn dashboard_reflects_live_counts() {
    let app = TestApp::spawn().await;
    app.write_post_file("a", "---\ntitle: \"A\"\nstatus: \"published\"\nviews: \"5\"\n---\nBody\n");
    app.client.post(app.url("/api/views")).json(&json!({ "slug": "a" })).send().await.unwrap();

    let dashboard: Value = app
        .admin(Method::GET, "/api/admin/dashboard")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(dashboard["posts"]["total"], 1);
    assert_eq!(dashboard["posts"]["published"], 1);
    assert_eq!(dashboard["posts"]["storedViews"], 5);
    assert_eq!(dashboard["topViewed"][0], json!({ "slug": "a", "views": 1 }));
    assert_eq!(dashboard["messages"]["total"], 0);
}
