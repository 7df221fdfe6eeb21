mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn intent_converts_to_minor_units() -> Result<()> {
    let server = common::spawn_server().await?;
    let member = server.member("a@x.com").await?;

    let body: Value = server
        .client
        .post(server.url("/payments/intent"))
        .bearer_auth(&member)
        .json(&json!({"price": 5}))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["data"]["amount"], 500);
    assert_eq!(body["data"]["currency"], "usd");
    assert_eq!(body["data"]["client_secret"], "pi_offline_500_usd_secret");

    let res = server
        .client
        .post(server.url("/payments/intent"))
        .bearer_auth(&member)
        .json(&json!({"price": 0}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn payment_history_is_private() -> Result<()> {
    let server = common::spawn_server().await?;
    let alice = server.member("alice@x.com").await?;
    let bob = server.member("bob@x.com").await?;

    let res = server
        .client
        .post(server.url("/payments"))
        .bearer_auth(&alice)
        .json(&json!({"biodata_id": 3, "amount": 5.0, "transaction_id": "pi_123"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let own: Value = server
        .client
        .get(server.url("/payments/alice@x.com"))
        .bearer_auth(&alice)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(own["data"][0]["transaction_id"], "pi_123");
    assert_eq!(own["data"][0]["status"], "pending");

    let res = server
        .client
        .get(server.url("/payments/alice@x.com"))
        .bearer_auth(&bob)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn admin_approves_contact_requests() -> Result<()> {
    let server = common::spawn_server().await?;
    let member = server.member("m@x.com").await?;
    let admin = server.admin("root@x.com").await?;

    server
        .client
        .post(server.url("/payments"))
        .bearer_auth(&member)
        .json(&json!({"biodata_id": 2, "amount": 5.0, "transaction_id": "pi_abc"}))
        .send()
        .await?
        .error_for_status()?;

    let pending: Value = server
        .client
        .get(server.url("/contact-requests"))
        .bearer_auth(&admin)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(pending["data"].as_array().map(Vec::len), Some(1));

    let res = server
        .client
        .patch(server.url("/contact-requests/m@x.com"))
        .bearer_auth(&admin)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let pending: Value = server
        .client
        .get(server.url("/contact-requests"))
        .bearer_auth(&admin)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(pending["data"].as_array().map(Vec::len), Some(0));

    let stats: Value = server.client.get(server.url("/admin/stats")).bearer_auth(&admin).send().await?.json().await?;
    assert_eq!(stats["data"]["revenue"], 5.0);

    let res = server
        .client
        .patch(server.url("/contact-requests/nobody@x.com"))
        .bearer_auth(&admin)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn success_stories_are_public() -> Result<()> {
    let server = common::spawn_server().await?;
    let res = server.client.get(server.url("/success-stories")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert!(body["data"].is_array());
    Ok(())
}
