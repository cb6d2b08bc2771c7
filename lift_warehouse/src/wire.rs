//! Snowflake REST wire types.
//!
//! Login, query and session-close all wrap their payload in the same
//! envelope: `{"data": ..., "success": bool, "code": ..., "message": ...}`.
//! Parsing is kept in pure functions so it can be tested without a server.

use serde::{Deserialize, Serialize};

use crate::error::WarehouseError;

// =============================================================================
// REQUESTS
// =============================================================================

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub data: LoginRequestData<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) struct LoginRequestData<'a> {
    pub client_app_id: &'a str,
    pub client_app_version: &'a str,
    pub account_name: &'a str,
    pub login_name: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QueryRequest<'a> {
    pub sql_text: &'a str,
    pub async_exec: bool,
    pub sequence_id: u64,
    pub query_submission_time: i64,
}

// =============================================================================
// RESPONSES
// =============================================================================

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    success: bool,
    #[serde(default)]
    code: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
}

impl<T> Envelope<T> {
    fn code(&self) -> String {
        match &self.code {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "unknown".to_string(),
        }
    }

    fn message(&self) -> String {
        self.message.clone().unwrap_or_else(|| "no message".to_string())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponseData {
    token: Option<String>,
    session_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct ColumnType {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryResponseData {
    #[serde(default)]
    rowtype: Vec<ColumnType>,
    #[serde(default)]
    rowset: Vec<Vec<Option<String>>>,
    query_id: Option<String>,
}

/// Tokens granted by a successful login.
#[derive(Debug, Clone)]
pub struct LoginGrant {
    pub token: String,
    pub session_id: Option<i64>,
}

/// Rows returned by a query; every cell arrives as nullable text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub query_id: Option<String>,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl QueryResult {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// First cell of the first row, if any
    pub fn first_value(&self) -> Option<&str> {
        self.rows.first()?.first()?.as_deref()
    }
}

// =============================================================================
// PARSING
// =============================================================================

pub(crate) fn parse_login(json: &str) -> Result<LoginGrant, WarehouseError> {
    let envelope: Envelope<LoginResponseData> =
        serde_json::from_str(json).map_err(|e| WarehouseError::Parse(e.to_string()))?;

    if !envelope.success {
        return Err(WarehouseError::LoginRejected {
            code: envelope.code(),
            message: envelope.message(),
        });
    }

    let data = envelope.data.ok_or(WarehouseError::MissingToken)?;
    let token = data.token.ok_or(WarehouseError::MissingToken)?;
    Ok(LoginGrant {
        token,
        session_id: data.session_id,
    })
}

pub(crate) fn parse_query(json: &str) -> Result<QueryResult, WarehouseError> {
    let envelope: Envelope<QueryResponseData> =
        serde_json::from_str(json).map_err(|e| WarehouseError::Parse(e.to_string()))?;

    if !envelope.success {
        return Err(WarehouseError::QueryFailed {
            code: envelope.code(),
            message: envelope.message(),
        });
    }

    let data = envelope
        .data
        .ok_or_else(|| WarehouseError::Parse("query response has no data".to_string()))?;
    Ok(QueryResult {
        query_id: data.query_id,
        columns: data.rowtype.into_iter().map(|c| c.name).collect(),
        rows: data.rowset,
    })
}

/// Session close responses only matter for their success flag.
pub(crate) fn parse_close(json: &str) -> Result<(), WarehouseError> {
    let envelope: Envelope<serde_json::Value> =
        serde_json::from_str(json).map_err(|e| WarehouseError::Parse(e.to_string()))?;
    if envelope.success {
        Ok(())
    } else {
        Err(WarehouseError::QueryFailed {
            code: envelope.code(),
            message: envelope.message(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_success() {
        let json = r#"{
            "data": {"token": "tok-1", "masterToken": "mtok-1", "sessionId": 4242, "validityInSeconds": 3600},
            "code": null, "message": null, "success": true
        }"#;
        let grant = parse_login(json).unwrap();
        assert_eq!(grant.token, "tok-1");
        assert_eq!(grant.session_id, Some(4242));
    }

    #[test]
    fn test_login_rejected() {
        let json = r#"{
            "data": {"nextAction": "RETRY_LOGIN", "authnMethod": "USERNAME_PASSWORD"},
            "code": "390100",
            "message": "Incorrect username or password was specified.",
            "success": false
        }"#;
        match parse_login(json) {
            Err(WarehouseError::LoginRejected { code, message }) => {
                assert_eq!(code, "390100");
                assert!(message.starts_with("Incorrect username"));
            }
            other => panic!("expected LoginRejected, got {:?}", other),
        }
    }

    #[test]
    fn test_login_without_token() {
        let json = r#"{"data": {}, "success": true}"#;
        assert!(matches!(parse_login(json), Err(WarehouseError::MissingToken)));
    }

    #[test]
    fn test_query_rows() {
        let json = r#"{
            "data": {
                "rowtype": [{"name": "ID", "type": "fixed"}, {"name": "CITY", "type": "text"}],
                "rowset": [["1", "Tulsa"], ["2", null]],
                "total": 2,
                "queryId": "01b2-0000"
            },
            "code": null, "message": null, "success": true
        }"#;
        let result = parse_query(json).unwrap();
        assert_eq!(result.columns, vec!["ID", "CITY"]);
        assert_eq!(result.row_count(), 2);
        assert_eq!(result.first_value(), Some("1"));
        assert_eq!(result.rows[1][1], None);
        assert_eq!(result.query_id.as_deref(), Some("01b2-0000"));
    }

    #[test]
    fn test_query_failed_numeric_code() {
        let json = r#"{
            "data": {"errorCode": "002003", "sqlState": "42S02"},
            "code": 2003,
            "message": "SQL compilation error: Object 'DEMO_TABLE' does not exist or not authorized.",
            "success": false
        }"#;
        match parse_query(json) {
            Err(WarehouseError::QueryFailed { code, message }) => {
                assert_eq!(code, "2003");
                assert!(message.contains("does not exist"));
            }
            other => panic!("expected QueryFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_close_success() {
        let json = r#"{"data": null, "code": null, "message": null, "success": true}"#;
        assert!(parse_close(json).is_ok());
    }

    #[test]
    fn test_close_rejected() {
        let json = r#"{"data": null, "code": "390112", "message": "Your session has expired. Please login again.", "success": false}"#;
        match parse_close(json) {
            Err(WarehouseError::QueryFailed { code, message }) => {
                assert_eq!(code, "390112");
                assert!(message.contains("expired"));
            }
            other => panic!("expected QueryFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_garbage_is_parse_error() {
        assert!(matches!(parse_query("<html>"), Err(WarehouseError::Parse(_))));
    }

    #[test]
    fn test_query_request_shape() {
        let body = QueryRequest {
            sql_text: "SELECT 1",
            async_exec: false,
            sequence_id: 3,
            query_submission_time: 1_700_000_000_000,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["sqlText"], "SELECT 1");
        assert_eq!(json["asyncExec"], false);
        assert_eq!(json["sequenceId"], 3);
    }

    #[test]
    fn test_login_request_shape() {
        let body = LoginRequest {
            data: LoginRequestData {
                client_app_id: "Foamlift",
                client_app_version: "0.1.0",
                account_name: "XY12345",
                login_name: "ESTIMATOR",
                password: "pw",
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["data"]["ACCOUNT_NAME"], "XY12345");
        assert_eq!(json["data"]["LOGIN_NAME"], "ESTIMATOR");
    }
}
