//! HTTP adapter for the admin API.

use reqwasm::http::Request;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::auth::AuthContext;
use crate::config::AppConfig;
use crate::error::{ConsoleError, Result};
use crate::grant::GrantAccessPayload;
use crate::models::{DashboardAggregate, PaymentRequest, Report, User};
use crate::requests::Decision;

/// Responses come either bare or wrapped as `{"data": ...}`. The envelope is
/// peeled first so a field error names the field instead of the envelope.
pub fn decode_body<T: DeserializeOwned>(text: &str) -> Result<T> {
    let decode_error = |e: serde_json::Error| ConsoleError::Decode(e.to_string());
    let mut value: Value = serde_json::from_str(text).map_err(decode_error)?;
    let data = value.as_object_mut().and_then(|object| object.remove("data"));
    serde_json::from_value(data.unwrap_or(value)).map_err(decode_error)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReviewPayload<'a> {
    admin_comment: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    config: AppConfig,
    auth: AuthContext,
}

impl ApiClient {
    pub fn new(config: AppConfig, auth: AuthContext) -> Self {
        Self { config, auth }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    fn with_auth(&self, mut request: Request) -> Request {
        for (name, value) in self.auth.headers() {
            request = request.header(name, &value);
        }
        request
    }

    async fn send(&self, request: Request, method: &str, path: &str) -> Result<String> {
        log::debug!("{} {}", method, path);
        let response = self.with_auth(request).send().await.map_err(|e| {
            log::warn!("{} {} failed: {}", method, path, e);
            ConsoleError::Network(e.to_string())
        })?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ConsoleError::Network(e.to_string()))?;
        if !response.ok() {
            log::warn!("{} {} returned {}", method, path, status);
            return Err(ConsoleError::from_response(status, &text));
        }
        Ok(text)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.config.endpoint(path);
        let text = self.send(Request::get(&url), "GET", path).await?;
        decode_body(&text)
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<String> {
        let url = self.config.endpoint(path);
        let body = serde_json::to_string(body).map_err(|e| ConsoleError::Decode(e.to_string()))?;
        let request = Request::post(&url)
            .header("Content-Type", "application/json")
            .body(body);
        self.send(request, "POST", path).await
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardAggregate> {
        self.get_json("/admin/dashboard/stats").await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.get_json("/admin/users").await
    }

    pub async fn list_reports(&self) -> Result<Vec<Report>> {
        self.get_json("/reports").await
    }

    pub async fn list_payment_requests(&self) -> Result<Vec<PaymentRequest>> {
        self.get_json("/admin/payment-requests").await
    }

    pub async fn submit_access_grant(&self, payload: &GrantAccessPayload) -> Result<()> {
        self.post("/admin/grant-access", payload).await.map(|_| ())
    }

    /// Approves or rejects a request and returns the server's updated copy.
    pub async fn review_request(
        &self,
        id: &str,
        decision: Decision,
        comment: &str,
    ) -> Result<PaymentRequest> {
        let path = format!("/admin/payment-requests/{}/{}", id, decision.action());
        let text = self
            .post(&path, &ReviewPayload {
                admin_comment: comment,
            })
            .await?;
        decode_body(&text)
    }

    pub async fn notify_user(&self, id: &str) -> Result<()> {
        let path = format!("/admin/payment-requests/{}/notify", id);
        self.post(&path, &serde_json::json!({})).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_wrapped_body() {
        let users: Vec<User> =
            decode_body(r#"{"data": [{"_id": "u1", "firstName": "Ann"}]}"#).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, "u1");
    }

    #[test]
    fn test_decode_bare_body() {
        let users: Vec<User> = decode_body(r#"[{"id": "u2", "firstName": "Bob"}]"#).unwrap();
        assert_eq!(users[0].first_name, "Bob");
    }

    #[test]
    fn test_decode_bare_aggregate() {
        let aggregate: DashboardAggregate =
            decode_body(r#"{"totalUsers": 5, "pendingRequests": 2}"#).unwrap();
        assert_eq!(aggregate.total_users, 5);
        assert_eq!(aggregate.pending_requests, 2);
    }

    #[test]
    fn test_decode_failure() {
        let result: Result<Vec<User>> = decode_body("<html></html>");
        assert!(matches!(result, Err(ConsoleError::Decode(_))));
    }

    #[test]
    fn test_decode_error_names_field() {
        let result: Result<Vec<User>> = decode_body(r#"{"data": [{"_id": "u1", "email": 7}]}"#);
        match result {
            Err(ConsoleError::Decode(message)) => assert!(message.contains("invalid type")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_decode_tolerates_null_fields() {
        let requests: Vec<PaymentRequest> = decode_body(
            r#"[{"_id": "a", "status": "pending", "amount": 10,
                 "user": {"firstName": "Ann", "lastName": null, "email": null},
                 "subscriptionPlan": {"name": null},
                 "paymentType": null, "isAdminGrant": null}]"#,
        )
        .unwrap();
        assert_eq!(requests[0].requester_name(), "Ann");
        assert_eq!(requests[0].title(), "Payment Request");
    }

    #[test]
    fn test_review_payload_shape() {
        let json = serde_json::to_string(&ReviewPayload {
            admin_comment: "Looks good",
        })
        .unwrap();
        assert_eq!(json, r#"{"adminComment":"Looks good"}"#);
    }
}
