use serde_json::json;

use crate::common::TestApp;

#[tokio::test]
async fn jwt_endpoint_sets_http_only_cookie() {
    let app = TestApp::spawn().await;

    let res = app
        .client
        .post(app.url("/jwt"))
        .json(&json!({ "email": "user@example.com" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 200);
    let set_cookie = res
        .headers()
        .get("set-cookie")
        .expect("cookie should be set")
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=None"));
}

#[tokio::test]
async fn jwt_endpoint_rejects_malformed_email() {
    let app = TestApp::spawn().await;

    let res = app
        .post_without_cookie("/jwt", &json!({ "email": "not-an-email" }))
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn logout_clears_the_cookie() {
    let app = TestApp::spawn().await;

    let res = app
        .client
        .post(app.url("/logout"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 200);
    let set_cookie = res
        .headers()
        .get("set-cookie")
        .expect("removal cookie should be set")
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn gated_route_without_cookie_is_unauthorized() {
    let app = TestApp::spawn().await;

    let res = app.get_without_cookie("/users").await;

    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"], "TOKEN_MISSING");
}

#[tokio::test]
async fn gated_route_with_garbage_cookie_is_unauthorized() {
    let app = TestApp::spawn().await;

    let res = app.get_with_cookie("/users", "token=not-a-jwt").await;

    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"], "TOKEN_INVALID");
}
