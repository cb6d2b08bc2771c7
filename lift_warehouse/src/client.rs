//! Snowflake REST client.
//!
//! Password login against `/session/v1/login-request`, synchronous queries
//! against `/queries/v1/query-request`, and `/session?delete=true` to log out.

use std::time::Duration;

use chrono::Utc;
use lift_core::WarehouseConfig;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use uuid::Uuid;

use crate::connection::{Connector, WarehouseSession};
use crate::error::WarehouseError;
use crate::wire::{self, LoginRequest, LoginRequestData, QueryRequest, QueryResult};

/// Client application name reported at login
const CLIENT_APP_ID: &str = "Foamlift";

/// Client version reported at login (from Cargo.toml)
const CLIENT_APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Opens password-authenticated Snowflake sessions.
pub struct SnowflakeConnector {
    config: WarehouseConfig,
    http: reqwest::Client,
    base_url: String,
}

impl SnowflakeConnector {
    pub fn new(config: WarehouseConfig) -> Result<Self, WarehouseError> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .user_agent(format!("{}/{}", CLIENT_APP_ID, CLIENT_APP_VERSION))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| WarehouseError::HttpClientBuild(e.to_string()))?;

        let base_url = format!("https://{}", config.host());
        Ok(SnowflakeConnector { config, http, base_url })
    }
}

impl Connector for SnowflakeConnector {
    type Session = SnowflakeSession;

    async fn connect(&self) -> Result<SnowflakeSession, WarehouseError> {
        let account_name = self.config.account_name();
        let body = LoginRequest {
            data: LoginRequestData {
                client_app_id: CLIENT_APP_ID,
                client_app_version: CLIENT_APP_VERSION,
                account_name: &account_name,
                login_name: &self.config.user,
                password: &self.config.password,
            },
        };
        let request_id = Uuid::new_v4().to_string();

        tracing::debug!(host = %self.base_url, user = %self.config.user, "logging in to warehouse");
        let response = self
            .http
            .post(format!("{}/session/v1/login-request", self.base_url))
            .query(&[
                ("warehouse", self.config.warehouse.as_str()),
                ("databaseName", self.config.database.as_str()),
                ("schemaName", self.config.schema.as_str()),
                ("roleName", self.config.role.as_str()),
                ("request_id", request_id.as_str()),
            ])
            .header(ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?;

        let grant = wire::parse_login(&read_body(response).await?)?;
        Ok(SnowflakeSession {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token: grant.token,
            session_id: grant.session_id,
            sequence: 0,
            open: true,
        })
    }
}

/// A logged-in Snowflake session. Close it with [`WarehouseSession::close`].
pub struct SnowflakeSession {
    http: reqwest::Client,
    base_url: String,
    token: String,
    session_id: Option<i64>,
    sequence: u64,
    open: bool,
}

impl SnowflakeSession {
    fn authorization(&self) -> String {
        format!("Snowflake Token=\"{}\"", self.token)
    }
}

impl WarehouseSession for SnowflakeSession {
    async fn query(&mut self, sql: &str) -> Result<QueryResult, WarehouseError> {
        self.sequence += 1;
        let body = QueryRequest {
            sql_text: sql,
            async_exec: false,
            sequence_id: self.sequence,
            query_submission_time: Utc::now().timestamp_millis(),
        };

        tracing::debug!(sql, sequence = self.sequence, "submitting query");
        let response = self
            .http
            .post(format!("{}/queries/v1/query-request", self.base_url))
            .query(&[("requestId", Uuid::new_v4().to_string())])
            .header(AUTHORIZATION, self.authorization())
            .header(ACCEPT, "application/snowflake")
            .json(&body)
            .send()
            .await?;

        wire::parse_query(&read_body(response).await?)
    }

    async fn close(mut self) -> Result<(), WarehouseError> {
        self.open = false;
        let response = self
            .http
            .post(format!("{}/session", self.base_url))
            .query(&[("delete", "true")])
            .header(AUTHORIZATION, self.authorization())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        wire::parse_close(&read_body(response).await?)?;
        tracing::debug!(session_id = ?self.session_id, "warehouse session closed");
        Ok(())
    }
}

impl Drop for SnowflakeSession {
    fn drop(&mut self) {
        if self.open {
            tracing::warn!(
                session_id = ?self.session_id,
                "warehouse session dropped without close; it will expire on the server"
            );
        }
    }
}

async fn read_body(response: reqwest::Response) -> Result<String, WarehouseError> {
    let status = response.status();
    let text = response.text().await?;
    if !status.is_success() {
        return Err(WarehouseError::Status {
            status: status.as_u16(),
            body: text,
        });
    }
    Ok(text)
}
