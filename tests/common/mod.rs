use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

static SERVER: OnceLock<TestServer> = OnceLock::new();

/// Integration tests need a reachable Postgres; without one they skip
/// instead of failing the suite.
pub fn database_configured() -> bool {
    let _ = dotenvy::dotenv();
    std::env::var("DATABASE_URL").is_ok()
}

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    #[allow(dead_code)]
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests.
        // DATABASE_URL is inherited; everything else gets a usable default.
        let mut cmd = Command::new("target/debug/rms-api");
        cmd.env("PORT", port.to_string())
            .env("APP_ENV", "test")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        for (key, value) in default_env(port) {
            if std::env::var(key).is_err() {
                cmd.env(key, value);
            }
        }

        let child = cmd.spawn().context("failed to spawn server binary")?;
        Ok(Self {
            port,
            base_url,
            child,
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = client.get(format!("{}/", self.base_url)).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

fn default_env(port: u16) -> Vec<(&'static str, String)> {
    vec![
        ("AUTH_SECRET", "0123456789abcdef0123456789abcdef".to_string()),
        ("AUTH_URL", format!("http://127.0.0.1:{port}")),
        ("GITHUB_CLIENT_ID", "test".to_string()),
        ("GITHUB_CLIENT_SECRET", "test".to_string()),
        ("GOOGLE_CLIENT_ID", "test".to_string()),
        ("GOOGLE_CLIENT_SECRET", "test".to_string()),
        ("MAIL_HOST", "127.0.0.1".to_string()),
        ("MAIL_PORT", "1025".to_string()),
        ("S3_ENDPOINT", "http://127.0.0.1:3902".to_string()),
        ("S3_REGION", "garage".to_string()),
        ("S3_ACCESS_KEY", "test".to_string()),
        ("S3_SECRET_KEY", "test".to_string()),
        ("S3_PUBLIC_URL", "http://127.0.0.1:3903".to_string()),
        ("S3_BUCKET_PROPERTY_IMAGES", "property-images".to_string()),
        ("S3_BUCKET_DOCUMENTS", "documents".to_string()),
        ("S3_BUCKET_USER_AVATARS", "user-avatars".to_string()),
    ]
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

pub async fn pool() -> Result<sqlx::PgPool> {
    let url = std::env::var("DATABASE_URL").context("DATABASE_URL not set")?;
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .context("failed to connect to test database")
}

/// Unique suffix so repeated runs never trip unique constraints.
pub fn unique(tag: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{tag}-{nanos}")
}

/// Sign up an owner, verify the email directly in the database (the mail
/// path is fire-and-forget), sign in, and hand back a bearer token plus
/// the owner id.
pub async fn create_and_login_owner(
    server: &TestServer,
    client: &reqwest::Client,
    tag: &str,
) -> Result<(String, i32)> {
    let email = format!("test-{}@example.com", unique(tag));
    let password = "Password123!";

    let res = client
        .post(format!("{}/api/auth/sign-up/email", server.base_url))
        .json(&json!({
            "name": "Test Owner",
            "email": email,
            "password": password,
            "role": "owner",
        }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "sign-up failed: {}", res.status());

    let pool = pool().await?;
    sqlx::query("UPDATE users SET email_verified = TRUE WHERE email = $1")
        .bind(&email)
        .execute(&pool)
        .await?;

    let res = client
        .post(format!("{}/api/auth/sign-in/email", server.base_url))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "sign-in failed: {}", res.status());
    let body: Value = res.json().await?;
    let token = body["data"]["token"]
        .as_str()
        .context("sign-in returned no token")?
        .to_string();

    let (owner_id,): (i32,) = sqlx::query_as(
        "SELECT o.id FROM owners o JOIN users u ON u.id = o.user_id WHERE u.email = $1",
    )
    .bind(&email)
    .fetch_one(&pool)
    .await?;

    Ok((token, owner_id))
}

pub fn generate_property(tag: &str) -> Value {
    // Unique zip keeps the (city, state, zip, country) constraint quiet
    // across runs.
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    json!({
        "name": "Test Property",
        "address": "123 Test St",
        "city": format!("City {tag}"),
        "state": "Davao del Sur",
        "zipCode": format!("{:08}", nanos % 100_000_000),
        "country": "Philippines",
        "propertyType": "single-unit",
    })
}

pub fn generate_tenant() -> Value {
    json!({
        "name": "John Doe",
        "email": "john.doe@example.com",
        "phone": "1234567890",
    })
}

pub fn generate_unit(unit_number: i32) -> Value {
    json!({ "unitNumber": unit_number, "monthlyRent": 1000 })
}

pub fn generate_lease(tenant_id: i32, start: &str, end: &str) -> Value {
    json!({
        "tenantId": tenant_id,
        "startDate": start,
        "endDate": end,
        "monthlyRent": 1000,
        "securityDeposit": 1000,
    })
}
