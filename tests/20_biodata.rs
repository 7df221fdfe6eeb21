mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn sequential_creations_get_consecutive_ids() -> Result<()> {
    let server = common::spawn_server().await?;
    let mut ids = Vec::new();
    for i in 0..4 {
        let token = server.member(&format!("m{i}@x.com")).await?;
        ids.push(server.create_biodata(&token, "Male", 25 + i).await?);
    }
    assert_eq!(ids, vec![1, 2, 3, 4]);
    Ok(())
}

#[tokio::test]
async fn age_range_filter_is_inclusive() -> Result<()> {
    let server = common::spawn_server().await?;
    for (i, age) in [22, 25, 30, 35, 40].into_iter().enumerate() {
        let token = server.member(&format!("m{i}@x.com")).await?;
        server.create_biodata(&token, "Female", age).await?;
    }

    let body: Value = server
        .client
        .get(server.url("/biodatas?min_age=25&max_age=35"))
        .send()
        .await?
        .json()
        .await?;
    let mut ages: Vec<i64> = body["data"]
        .as_array()
        .map(|list| list.iter().filter_map(|b| b["age"].as_i64()).collect())
        .unwrap_or_default();
    ages.sort();
    assert_eq!(ages, vec![25, 30, 35]);

    let all: Value = server.client.get(server.url("/biodatas")).send().await?.json().await?;
    assert_eq!(all["data"].as_array().map(Vec::len), Some(5));
    Ok(())
}

#[tokio::test]
async fn type_filter_and_descending_sort() -> Result<()> {
    let server = common::spawn_server().await?;
    let a = server.member("a@x.com").await?;
    let b = server.member("b@x.com").await?;
    let c = server.member("c@x.com").await?;
    server.create_biodata(&a, "Male", 30).await?;
    server.create_biodata(&b, "Female", 24).await?;
    server.create_biodata(&c, "Female", 29).await?;

    let body: Value = server
        .client
        .get(server.url("/biodatas?type=Female&sort=desc"))
        .send()
        .await?
        .json()
        .await?;
    let ages: Vec<i64> = body["data"]
        .as_array()
        .map(|list| list.iter().filter_map(|b| b["age"].as_i64()).collect())
        .unwrap_or_default();
    assert_eq!(ages, vec![29, 24]);
    Ok(())
}

#[tokio::test]
async fn replace_then_get_returns_last_written_fields() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.member("owner@x.com").await?;
    let id = server.create_biodata(&token, "Male", 28).await?;

    let mut update = common::biodata_body("Male", 31);
    update["occupation"] = "Architect".into();
    update["mobile_number"] = "+8801800000000".into();

    let res = server
        .client
        .put(server.url(&format!("/biodatas/{id}")))
        .bearer_auth(&token)
        .json(&update)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = server
        .client
        .get(server.url(&format!("/biodatas/{id}")))
        .bearer_auth(&token)
        .send()
        .await?
        .json()
        .await?;
    let stored = &body["data"];
    assert_eq!(stored["biodata_id"], id);
    assert_eq!(stored["email"], "owner@x.com");
    for (key, value) in update.as_object().into_iter().flatten() {
        assert_eq!(&stored[key], value, "field {key}");
    }
    Ok(())
}

#[tokio::test]
async fn replace_of_someone_elses_biodata_is_not_found() -> Result<()> {
    let server = common::spawn_server().await?;
    let owner = server.member("owner@x.com").await?;
    let intruder = server.member("intruder@x.com").await?;
    let id = server.create_biodata(&owner, "Male", 28).await?;

    let res = server
        .client
        .put(server.url(&format!("/biodatas/{id}")))
        .bearer_auth(&intruder)
        .json(&common::biodata_body("Female", 20))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn detail_routes_need_a_token_but_listing_does_not() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.member("owner@x.com").await?;
    let id = server.create_biodata(&token, "Male", 28).await?;

    let res = server.client.get(server.url("/biodatas")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = server.client.get(server.url(&format!("/biodatas/{id}"))).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = server
        .client
        .get(server.url("/biodatas/owner/owner@x.com"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = server
        .client
        .get(server.url("/biodatas/999"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn similar_excludes_the_viewed_profile() -> Result<()> {
    let server = common::spawn_server().await?;
    let mut first = None;
    for i in 0..5 {
        let token = server.member(&format!("f{i}@x.com")).await?;
        let id = server.create_biodata(&token, "Female", 23 + i).await?;
        first.get_or_insert(id);
    }
    let viewer = server.member("viewer@x.com").await?;
    let exclude = first.unwrap_or(1);

    let body: Value = server
        .client
        .get(server.url(&format!("/biodatas/similar?type=Female&exclude={exclude}")))
        .bearer_auth(&viewer)
        .send()
        .await?
        .json()
        .await?;
    let ids: Vec<i64> = body["data"]
        .as_array()
        .map(|list| list.iter().filter_map(|b| b["biodata_id"].as_i64()).collect())
        .unwrap_or_default();
    assert_eq!(ids.len(), 3);
    assert!(!ids.contains(&exclude));
    Ok(())
}

#[tokio::test]
async fn favorites_are_scoped_to_their_owner() -> Result<()> {
    let server = common::spawn_server().await?;
    let alice = server.member("alice@x.com").await?;
    let bob = server.member("bob@x.com").await?;
    let favorite = serde_json::json!({"biodata_id": 7, "name": "Member", "permanent_division": "Dhaka", "occupation": "Teacher"});

    for token in [&alice, &bob] {
        let res = server.client.post(server.url("/favorites")).bearer_auth(token).json(&favorite).send().await?;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    // Bob removing biodata 7 leaves Alice's entry alone
    let res = server.client.delete(server.url("/favorites/7")).bearer_auth(&bob).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = server.client.delete(server.url("/favorites/7")).bearer_auth(&bob).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body: Value = server.client.get(server.url("/favorites")).bearer_auth(&alice).send().await?.json().await?;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"][0]["email"], "alice@x.com");
    Ok(())
}
