use serde_json::json;

use crate::common::TestApp;

#[tokio::test]
async fn fee_is_converted_to_minor_units() {
    let app = TestApp::spawn().await;

    let res = app
        .post_without_cookie("/create-payment-intent", &json!({ "fee": 25.0 }))
        .await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["amount_minor"], 2500);
    assert_eq!(res.body["currency"], "usd");
    assert!(res.body["client_secret"].as_str().unwrap().contains("_secret_"));
    assert!(res.body["intent_id"].as_str().unwrap().starts_with("pi_"));
}

#[tokio::test]
async fn fractional_fees_truncate() {
    let app = TestApp::spawn().await;

    let res = app
        .post_without_cookie("/create-payment-intent", &json!({ "fee": 10.5 }))
        .await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["amount_minor"], 1050);
}

#[tokio::test]
async fn non_positive_fee_is_rejected() {
    let app = TestApp::spawn().await;

    for fee in [0.0, -5.0] {
        let res = app
            .post_without_cookie("/create-payment-intent", &json!({ "fee": fee }))
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn intent_feeds_the_registration_flow() {
    let app = TestApp::spawn().await;
    let creator = app
        .create_user_with_role("creator@example.com", crate::common::Role::Creator)
        .await;
    let contest_id = app.create_contest(&creator, "Paid Contest", "art", 25.0).await;
    app.publish_contest(contest_id).await;

    let intent = app
        .post_without_cookie("/create-payment-intent", &json!({ "fee": 25.0 }))
        .await;
    let payment_ref = intent.body["intent_id"].as_str().unwrap().to_string();

    let cookie = app.auth_cookie("payer@example.com").await;
    let res = app
        .post_with_cookie(
            "/registered-contests",
            &json!({
                "contest_id": contest_id,
                "email": "payer@example.com",
                "payment_ref": payment_ref,
            }),
            &cookie,
        )
        .await;

    assert_eq!(res.status, 201);
    assert_eq!(res.body["payment_ref"], intent.body["intent_id"]);
}
