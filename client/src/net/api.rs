//! Typed REST endpoints consumed by pages and components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Thin wrappers over `ApiClient`: each builds a path + body and decodes the
//! server record. No business rules live here; the backend owns them.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

use super::error::ApiError;
use super::http::{ApiClient, FileUpload, FormPart, Method, Transport};
use super::types::{
    AuthResponse, Claim, ClaimRequest, CoverageUsage, Document, Frequency, InitiatePaymentRequest,
    InitiatePaymentResponse, LoginRequest, Payment, PaymentAnalytics, PaymentStatusResponse, Plan, PlanInput,
    RegisterRequest, Role, SubscribeRequest, Subscription, SystemHealth, User, VerifyTransactionRequest,
};
use crate::util::storage::KeyValueStorage;

/// Percent-encode one path segment or query value.
#[must_use]
pub fn encode(raw: &str) -> String {
    utf8_percent_encode(raw, NON_ALPHANUMERIC).to_string()
}

fn payment_status_endpoint(payment_id: &str) -> String {
    format!("/payments/{}/status", encode(payment_id))
}

fn admin_users_endpoint(search: &str, role: Option<Role>) -> String {
    let mut params = Vec::new();
    if !search.trim().is_empty() {
        params.push(format!("search={}", encode(search.trim())));
    }
    if let Some(role) = role {
        params.push(format!("role={}", role.as_str()));
    }
    if params.is_empty() { "/admin/users".to_owned() } else { format!("/admin/users?{}", params.join("&")) }
}

fn admin_documents_endpoint(verified: Option<bool>) -> String {
    match verified {
        Some(v) => format!("/admin/documents?verified={v}"),
        None => "/admin/documents".to_owned(),
    }
}

impl<T: Transport, S: KeyValueStorage> ApiClient<T, S> {
    // -------------------------------------------------------------------------
    // auth
    // -------------------------------------------------------------------------

    /// `POST /auth/login`; stores the returned tokens in the area chosen by
    /// `remember`.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection message or a transport failure.
    pub async fn login(&self, email: &str, password: &str, remember: bool) -> Result<User, ApiError> {
        let body = LoginRequest { email: email.to_owned(), password: password.to_owned() };
        let resp: AuthResponse = self.send_json(Method::Post, "/auth/login", &body).await?;
        self.tokens().save(&resp.token, resp.refresh_token.as_deref(), remember);
        Ok(resp.user)
    }

    /// `POST /auth/register`; a successful registration signs the user in for
    /// this browser session.
    ///
    /// # Errors
    ///
    /// Returns the server's validation message or a transport failure.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        let resp: AuthResponse = self.send_json(Method::Post, "/auth/register", request).await?;
        self.tokens().save(&resp.token, resp.refresh_token.as_deref(), false);
        Ok(resp.user)
    }

    /// `GET /auth/me`.
    ///
    /// # Errors
    ///
    /// Returns an error when no valid session exists.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.get("/auth/me").await
    }

    /// `POST /auth/logout` (best effort) and drop local tokens.
    pub async fn logout(&self) {
        if let Err(e) = self.execute(Method::Post, "/auth/logout", None).await {
            leptos::logging::warn!("logout request failed: {e}");
        }
        self.tokens().clear();
    }

    // -------------------------------------------------------------------------
    // plans + subscriptions
    // -------------------------------------------------------------------------

    /// `GET /plans`.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error.
    pub async fn plans(&self) -> Result<Vec<Plan>, ApiError> {
        self.get("/plans").await
    }

    /// `GET /subscriptions/me`; `None` when the member has no subscription.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error (404 is mapped to `Ok(None)`).
    pub async fn my_subscription(&self) -> Result<Option<Subscription>, ApiError> {
        match self.get::<Option<Subscription>>("/subscriptions/me").await {
            Err(ApiError::Api { status: 404, .. }) => Ok(None),
            other => other,
        }
    }

    /// `POST /subscriptions`.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error.
    pub async fn subscribe(&self, plan_id: &str, frequency: Frequency) -> Result<Subscription, ApiError> {
        let body = SubscribeRequest { plan_id: plan_id.to_owned(), frequency };
        self.send_json(Method::Post, "/subscriptions", &body).await
    }

    /// `GET /subscriptions/me/coverage`.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error.
    pub async fn coverage(&self) -> Result<Vec<CoverageUsage>, ApiError> {
        self.get("/subscriptions/me/coverage").await
    }

    // -------------------------------------------------------------------------
    // payments
    // -------------------------------------------------------------------------

    /// `POST /payments/initiate`: starts an STK push.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error.
    pub async fn initiate_payment(&self, request: &InitiatePaymentRequest) -> Result<InitiatePaymentResponse, ApiError> {
        self.send_json(Method::Post, "/payments/initiate", request).await
    }

    /// `GET /payments/{id}/status`.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error.
    pub async fn payment_status(&self, payment_id: &str) -> Result<PaymentStatusResponse, ApiError> {
        self.get(&payment_status_endpoint(payment_id)).await
    }

    /// `POST /payments/verify-transaction` with a manually observed M-Pesa code.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error.
    pub async fn verify_transaction(&self, request: &VerifyTransactionRequest) -> Result<PaymentStatusResponse, ApiError> {
        self.send_json(Method::Post, "/payments/verify-transaction", request)
            .await
    }

    /// `GET /payments/history`.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error.
    pub async fn payment_history(&self) -> Result<Vec<Payment>, ApiError> {
        self.get("/payments/history").await
    }

    // -------------------------------------------------------------------------
    // documents + claims
    // -------------------------------------------------------------------------

    /// `GET /documents`.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error.
    pub async fn documents(&self) -> Result<Vec<Document>, ApiError> {
        self.get("/documents").await
    }

    /// `POST /documents` as multipart: `file`, `name`, `type`.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error.
    pub async fn upload_document(&self, name: &str, doc_type: &str, file: FileUpload) -> Result<Document, ApiError> {
        let parts = vec![
            FormPart::File { name: "file".to_owned(), file },
            FormPart::Text { name: "name".to_owned(), value: name.to_owned() },
            FormPart::Text { name: "type".to_owned(), value: doc_type.to_owned() },
        ];
        self.upload("/documents", parts).await
    }

    /// `DELETE /documents/{id}`.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error.
    pub async fn delete_document(&self, document_id: &str) -> Result<(), ApiError> {
        let path = format!("/documents/{}", encode(document_id));
        self.execute(Method::Delete, &path, None).await
    }

    /// `GET /claims`.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error.
    pub async fn claims(&self) -> Result<Vec<Claim>, ApiError> {
        self.get("/claims").await
    }

    /// `POST /claims`.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error.
    pub async fn submit_claim(&self, request: &ClaimRequest) -> Result<Claim, ApiError> {
        self.send_json(Method::Post, "/claims", request).await
    }

    // -------------------------------------------------------------------------
    // admin
    // -------------------------------------------------------------------------

    /// `GET /admin/users?search=&role=`.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error.
    pub async fn admin_users(&self, search: &str, role: Option<Role>) -> Result<Vec<User>, ApiError> {
        self.get(&admin_users_endpoint(search, role)).await
    }

    /// `PATCH /admin/users/{id}/status`.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error.
    pub async fn set_user_active(&self, user_id: &str, active: bool) -> Result<User, ApiError> {
        let path = format!("/admin/users/{}/status", encode(user_id));
        self.send_json(Method::Patch, &path, &serde_json::json!({ "isActive": active }))
            .await
    }

    /// `PATCH /admin/users/{id}/role`.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error.
    pub async fn set_user_role(&self, user_id: &str, role: Role) -> Result<User, ApiError> {
        let path = format!("/admin/users/{}/role", encode(user_id));
        self.send_json(Method::Patch, &path, &serde_json::json!({ "role": role }))
            .await
    }

    /// `POST /admin/plans`.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error.
    pub async fn create_plan(&self, plan: &PlanInput) -> Result<Plan, ApiError> {
        self.send_json(Method::Post, "/admin/plans", plan).await
    }

    /// `PUT /admin/plans/{id}`, a full replacement.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error.
    pub async fn update_plan(&self, plan_id: &str, plan: &PlanInput) -> Result<Plan, ApiError> {
        let path = format!("/admin/plans/{}", encode(plan_id));
        self.send_json(Method::Put, &path, plan).await
    }

    /// `DELETE /admin/plans/{id}`.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error.
    pub async fn delete_plan(&self, plan_id: &str) -> Result<(), ApiError> {
        let path = format!("/admin/plans/{}", encode(plan_id));
        self.execute(Method::Delete, &path, None).await
    }

    /// `GET /admin/payments`.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error.
    pub async fn admin_payments(&self) -> Result<Vec<Payment>, ApiError> {
        self.get("/admin/payments").await
    }

    /// `GET /admin/payments/analytics?days=`.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error.
    pub async fn payment_analytics(&self, days: u32) -> Result<PaymentAnalytics, ApiError> {
        self.get(&format!("/admin/payments/analytics?days={days}")).await
    }

    /// `GET /admin/system/health`.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error.
    pub async fn system_health(&self) -> Result<SystemHealth, ApiError> {
        self.get("/admin/system/health").await
    }

    /// `GET /admin/documents?verified=`.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error.
    pub async fn admin_documents(&self, verified: Option<bool>) -> Result<Vec<Document>, ApiError> {
        self.get(&admin_documents_endpoint(verified)).await
    }

    /// `PATCH /admin/documents/{id}/verify`.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error.
    pub async fn verify_document(&self, document_id: &str, verified: bool) -> Result<Document, ApiError> {
        let path = format!("/admin/documents/{}/verify", encode(document_id));
        self.send_json(Method::Patch, &path, &serde_json::json!({ "verified": verified }))
            .await
    }
}
