
use reqwest::{header, Method, StatusCode};
use serde_json::Value;
use test_utils::*;

#[actix_rt::test]
async fn admin_routes_challenge_anonymous_requests() {
    let app = TestApp::spawn().await;

    for path in ["/api/admin/blog", "/api/admin/projects", "/admin/health", "/api/admin/does-not-exist"] {
        let response = app.client.get(app.url(path)).send().await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{path}");
        let challenge = response.headers().get(header::WWW_AUTHENTICATE).unwrap();
        assert_eq!(challenge, "Basic realm=\"Admin Area - Secure Access\"");

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Authentication required");
    }
}

#[actix_rt::test]
async fn wrong_basic_credentials_are_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(app.url("/api/admin/blog"))
        .header(header::AUTHORIZATION, basic_auth(ADMIN_USER, "guess"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));
}

#[actix_rt::test]
async fn valid_basic_credentials_pass() {
    let app = TestApp::spawn().await;

    let response = app.admin(Method::GET, "/api/admin/blog").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let posts: Vec<Value> = response.json().await.unwrap();
    assert!(posts.is_empty());
}

#[actix_rt::test]
async fn session_cookie_grants_access() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(app.url("/api/admin/projects"))
        .header(header::COOKIE, "admin-session=anything")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let empty = app
        .client
        .get(app.url("/api/admin/projects"))
        .header(header::COOKIE, "admin-session=")
        .send()
        .await
        .unwrap();
    assert_eq!(empty.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn session_endpoint_issues_a_usable_cookie() {
    let app = TestApp::spawn().await;

    let response = app.admin(Method::POST, "/admin/session").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("admin-session="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Strict"));

    let pair = set_cookie.split(';').next().unwrap();
    let with_cookie = app
        .client
        .get(app.url("/api/admin/dashboard"))
        .header(header::COOKIE, pair)
        .send()
        .await
        .unwrap();
    assert_eq!(with_cookie.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn lookalike_and_public_paths_are_not_gated() {
    let app = TestApp::spawn().await;

    let lookalike = app.client.get(app.url("/administrator")).send().await.unwrap();
    assert_eq!(lookalike.status(), StatusCode::NOT_FOUND);

    let public = app.client.get(app.url("/api/blog")).send().await.unwrap();
    assert_eq!(public.status(), StatusCode::OK);

    let home = app.client.get(app.url("/")).send().await.unwrap();
    assert_eq!(home.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn trailing_slash_does_not_bypass_the_gate() {
    let app = TestApp::spawn().await;

    let response = app.client.get(app.url("/api/admin/blog/")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn preflight_requests_pass() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .request(Method::OPTIONS, app.url("/api/admin/blog"))
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .send()
        .await
        .unwrap();

    assert_ne!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[actix_rt::test]
async fn health_reports_storage() {
    let app = TestApp::spawn().await;

    let response = app.admin(Method::GET, "/admin/health").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["projects_file"], "OK");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["uptime"].is_string());
}
