mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn tenant_crud_and_leases() -> Result<()> {
    if !common::database_configured() {
        eprintln!("skipping: DATABASE_URL not configured");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let (token, _) = common::create_and_login_owner(server, &client, "tenant-crud").await?;

    let res = client
        .post(format!("{}/api/owners/tenants", server.base_url))
        .bearer_auth(&token)
        .json(&common::generate_tenant())
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let tenant: Value = res.json().await?;
    let tenant_id = tenant["data"]["id"].as_i64().unwrap();
    assert_eq!(tenant["data"]["name"], "John Doe");

    let res = client
        .patch(format!(
            "{}/api/owners/tenants/{tenant_id}",
            server.base_url
        ))
        .bearer_auth(&token)
        .json(&json!({ "phone": "0987654321" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await?;
    assert_eq!(updated["data"]["phone"], "0987654321");
    assert_eq!(updated["data"]["name"], "John Doe");

    // No leases yet
    let res = client
        .get(format!(
            "{}/api/owners/tenants/{tenant_id}/leases",
            server.base_url
        ))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let leases: Value = res.json().await?;
    assert!(leases["data"].as_array().unwrap().is_empty());

    // Another owner cannot see this tenant
    let (token_b, _) = common::create_and_login_owner(server, &client, "tenant-owner-b").await?;
    let res = client
        .get(format!(
            "{}/api/owners/tenants/{tenant_id}",
            server.base_url
        ))
        .bearer_auth(&token_b)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn payments_under_an_owned_lease() -> Result<()> {
    if !common::database_configured() {
        eprintln!("skipping: DATABASE_URL not configured");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let (token, _) = common::create_and_login_owner(server, &client, "payments").await?;

    // property -> unit -> tenant -> lease
    let res = client
        .post(format!("{}/api/owners/properties", server.base_url))
        .bearer_auth(&token)
        .json(&common::generate_property("payments"))
        .send()
        .await?;
    let property: Value = res.json().await?;
    let property_id = property["data"]["id"].as_i64().unwrap();

    let res = client
        .post(format!(
            "{}/api/owners/properties/{property_id}/units",
            server.base_url
        ))
        .bearer_auth(&token)
        .json(&common::generate_unit(7))
        .send()
        .await?;
    let unit: Value = res.json().await?;
    let unit_id = unit["data"]["id"].as_i64().unwrap();

    let res = client
        .post(format!("{}/api/owners/tenants", server.base_url))
        .bearer_auth(&token)
        .json(&common::generate_tenant())
        .send()
        .await?;
    let tenant: Value = res.json().await?;
    let tenant_id = tenant["data"]["id"].as_i64().unwrap();

    let res = client
        .post(format!(
            "{}/api/owners/units/{unit_id}/leases",
            server.base_url
        ))
        .bearer_auth(&token)
        .json(&common::generate_lease(
            tenant_id as i32,
            "2025-01-01",
            "2099-01-01",
        ))
        .send()
        .await?;
    let lease: Value = res.json().await?;
    let lease_id = lease["data"]["id"].as_i64().unwrap();

    // Record a rent payment
    let res = client
        .post(format!(
            "{}/api/owners/leases/{lease_id}/payments",
            server.base_url
        ))
        .bearer_auth(&token)
        .json(&json!({
            "amount": 1000,
            "paymentType": "rent",
            "datePaid": "2026-02-18",
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let payment: Value = res.json().await?;
    assert_eq!(payment["data"]["amount"], 1000);
    assert_eq!(payment["data"]["paymentType"], "rent");
    assert_eq!(payment["data"]["datePaid"], "2026-02-18");

    // Newest first
    client
        .post(format!(
            "{}/api/owners/leases/{lease_id}/payments",
            server.base_url
        ))
        .bearer_auth(&token)
        .json(&json!({
            "amount": 500,
            "paymentType": "deposit",
            "datePaid": "2026-03-01",
        }))
        .send()
        .await?;
    let res = client
        .get(format!(
            "{}/api/owners/leases/{lease_id}/payments",
            server.base_url
        ))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let listed: Value = res.json().await?;
    let items = listed["data"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["datePaid"], "2026-03-01");

    // A negative amount never reaches the database
    let res = client
        .post(format!(
            "{}/api/owners/leases/{lease_id}/payments",
            server.base_url
        ))
        .bearer_auth(&token)
        .json(&json!({
            "amount": -10,
            "paymentType": "rent",
            "datePaid": "2026-02-18",
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Foreign owner: the lease does not exist as far as they can tell
    let (token_b, _) = common::create_and_login_owner(server, &client, "payments-owner-b").await?;
    let res = client
        .post(format!(
            "{}/api/owners/leases/{lease_id}/payments",
            server.base_url
        ))
        .bearer_auth(&token_b)
        .json(&json!({
            "amount": 1000,
            "paymentType": "rent",
            "datePaid": "2026-02-18",
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
