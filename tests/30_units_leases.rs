mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

/// Create a property, a unit and a tenant under a fresh owner; returns
/// (token, property id, unit id, tenant id).
async fn setup(
    server: &common::TestServer,
    client: &reqwest::Client,
    tag: &str,
) -> Result<(String, i64, i64, i64)> {
    let (token, _) = common::create_and_login_owner(server, client, tag).await?;

    let res = client
        .post(format!("{}/api/owners/properties", server.base_url))
        .bearer_auth(&token)
        .json(&common::generate_property(tag))
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
        .json(&common::generate_unit(101))
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

    Ok((token, property_id, unit_id, tenant_id))
}

#[tokio::test]
async fn lease_lifecycle_and_availability() -> Result<()> {
    if !common::database_configured() {
        eprintln!("skipping: DATABASE_URL not configured");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let (token, _property_id, unit_id, tenant_id) =
        setup(server, &client, "lease-lifecycle").await?;

    // Active lease (ends far in the future)
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
    assert_eq!(res.status(), StatusCode::CREATED);
    let lease: Value = res.json().await?;
    let lease_id = lease["data"]["id"].as_i64().unwrap();
    assert_eq!(lease["data"]["unitId"].as_i64(), Some(unit_id));

    // The unit now refuses a second lease
    let res = client
        .post(format!(
            "{}/api/owners/units/{unit_id}/leases",
            server.base_url
        ))
        .bearer_auth(&token)
        .json(&common::generate_lease(
            tenant_id as i32,
            "2099-02-01",
            "2099-12-01",
        ))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "Unit is not available");

    // Lease appears under the unit
    let res = client
        .get(format!(
            "{}/api/owners/units/{unit_id}/leases",
            server.base_url
        ))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let listed: Value = res.json().await?;
    assert!(listed["data"]
        .as_array()
        .unwrap()
        .iter()
        .any(|l| l["id"].as_i64() == Some(lease_id)));

    // Update rent only
    let res = client
        .patch(format!("{}/api/owners/leases/{lease_id}", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "monthlyRent": 1500 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await?;
    assert_eq!(updated["data"]["monthlyRent"], 1500);
    Ok(())
}

#[tokio::test]
async fn lease_validation_rules() -> Result<()> {
    if !common::database_configured() {
        eprintln!("skipping: DATABASE_URL not configured");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let (token, _property_id, unit_id, tenant_id) =
        setup(server, &client, "lease-validation").await?;

    // Backwards range
    let res = client
        .post(format!(
            "{}/api/owners/units/{unit_id}/leases",
            server.base_url
        ))
        .bearer_auth(&token)
        .json(&common::generate_lease(
            tenant_id as i32,
            "2025-01-01",
            "2024-01-01",
        ))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = res.json().await?;
    assert_eq!(body["success"], false);
    let message = body["error"]["issues"][0]["message"].as_str().unwrap();
    assert!(message
        .to_lowercase()
        .contains("end date must be after start date"));

    // A real lease to update
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

    // One date without the other
    let res = client
        .patch(format!("{}/api/owners/leases/{lease_id}", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "endDate": "2099-06-01" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = res.json().await?;
    let message = body["error"]["issues"][0]["message"].as_str().unwrap();
    assert!(message.contains("provided together"));

    // Empty update object
    let res = client
        .patch(format!("{}/api/owners/leases/{lease_id}", server.base_url))
        .bearer_auth(&token)
        .json(&json!({}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}

#[tokio::test]
async fn foreign_owner_sees_404_everywhere() -> Result<()> {
    if !common::database_configured() {
        eprintln!("skipping: DATABASE_URL not configured");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let (token_a, _property_id, unit_id, tenant_id) =
        setup(server, &client, "lease-cross-owner").await?;
    let (token_b, _) = common::create_and_login_owner(server, &client, "lease-owner-b").await?;

    let res = client
        .post(format!(
            "{}/api/owners/units/{unit_id}/leases",
            server.base_url
        ))
        .bearer_auth(&token_a)
        .json(&common::generate_lease(
            tenant_id as i32,
            "2025-01-01",
            "2099-01-01",
        ))
        .send()
        .await?;
    let lease: Value = res.json().await?;
    let lease_id = lease["data"]["id"].as_i64().unwrap();

    // B cannot read or update A's unit or lease
    let res = client
        .get(format!("{}/api/owners/units/{unit_id}", server.base_url))
        .bearer_auth(&token_b)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .patch(format!("{}/api/owners/leases/{lease_id}", server.base_url))
        .bearer_auth(&token_b)
        .json(&json!({ "monthlyRent": 9999 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // And B's listings stay empty of A's records
    let res = client
        .get(format!("{}/api/owners/leases", server.base_url))
        .bearer_auth(&token_b)
        .send()
        .await?;
    let listed: Value = res.json().await?;
    assert!(!listed["data"]
        .as_array()
        .unwrap()
        .iter()
        .any(|l| l["id"].as_i64() == Some(lease_id)));
    Ok(())
}
