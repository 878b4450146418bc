//! Wire DTOs mirroring backend records.
//!
//! DESIGN
//! ======
//! These are thin client-side mirrors: never persisted, replaced wholesale on
//! re-fetch. The backend speaks `camelCase` JSON and may send Mongo-style
//! `_id` keys, so every `id` field accepts both.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

// =============================================================================
// PLANS
// =============================================================================

/// Billing cadence for a subscription.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Annual,
}

impl Frequency {
    pub const ALL: [Frequency; 4] = [Self::Daily, Self::Weekly, Self::Monthly, Self::Annual];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Annual => "annual",
        }
    }

    /// Suffix used next to a premium amount, e.g. `KES 2,400 / month`.
    #[must_use]
    pub fn per_label(self) -> &'static str {
        match self {
            Self::Daily => "day",
            Self::Weekly => "week",
            Self::Monthly => "month",
            Self::Annual => "year",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == raw)
    }
}

/// Premium amounts in KES for each billing frequency.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Premiums {
    pub daily: f64,
    pub weekly: f64,
    pub monthly: f64,
    pub annual: f64,
}

impl Premiums {
    #[must_use]
    pub fn for_frequency(&self, frequency: Frequency) -> f64 {
        match frequency {
            Frequency::Daily => self.daily,
            Frequency::Weekly => self.weekly,
            Frequency::Monthly => self.monthly,
            Frequency::Annual => self.annual,
        }
    }
}

/// An insurance or union-membership plan.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Plan family, e.g. `"medical"` or `"union"`.
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub premiums: Premiums,
    #[serde(default)]
    pub benefits: Vec<String>,
    /// Coverage limit in KES keyed by benefit category (inpatient, outpatient, ...).
    #[serde(default)]
    pub coverage_limits: BTreeMap<String, f64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Full replacement body submitted by the admin plan editor.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanInput {
    pub name: String,
    pub description: String,
    pub category: String,
    pub premiums: Premiums,
    pub benefits: Vec<String>,
    pub coverage_limits: BTreeMap<String, f64>,
    pub is_active: bool,
}

// =============================================================================
// SUBSCRIPTIONS
// =============================================================================

/// A subscription references its plan either by id or embedded (populated).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlanRef {
    Embedded(Box<Plan>),
    Id(String),
}

impl PlanRef {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Embedded(plan) => &plan.id,
            Self::Id(id) => id,
        }
    }

    #[must_use]
    pub fn plan(&self) -> Option<&Plan> {
        match self {
            Self::Embedded(plan) => Some(plan),
            Self::Id(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    #[serde(alias = "_id")]
    pub id: String,
    pub plan: PlanRef,
    pub frequency: Frequency,
    pub status: String,
    #[serde(default)]
    pub next_payment_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
}

impl Subscription {
    /// Premium due each cycle, when the plan is embedded.
    #[must_use]
    pub fn premium(&self) -> Option<f64> {
        self.plan.plan().map(|p| p.premiums.for_frequency(self.frequency))
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status.eq_ignore_ascii_case("active")
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    pub plan_id: String,
    pub frequency: Frequency,
}

/// Used amount against a coverage limit for one benefit category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageUsage {
    pub category: String,
    pub limit: f64,
    #[serde(default)]
    pub used: f64,
}

// =============================================================================
// PAYMENTS
// =============================================================================

/// Settlement status as reported by the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Processing,
    Waiting,
    #[default]
    Pending,
    Completed,
    Failed,
    Timeout,
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Waiting => "waiting",
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Timeout => "timeout",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(alias = "_id")]
    pub id: String,
    pub amount: f64,
    #[serde(default)]
    pub phone_number: String,
    pub status: PaymentStatus,
    #[serde(default)]
    pub mpesa_receipt_number: Option<String>,
    #[serde(default)]
    pub checkout_request_id: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiatePaymentRequest {
    pub amount: f64,
    /// Normalised `2547XXXXXXXX` form.
    pub phone_number: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiatePaymentResponse {
    #[serde(alias = "id", alias = "_id")]
    pub payment_id: String,
    #[serde(default)]
    pub checkout_request_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusResponse {
    pub status: PaymentStatus,
    #[serde(default)]
    pub mpesa_receipt_number: Option<String>,
    /// Gateway failure description, when the payment failed.
    #[serde(default, alias = "failureReason", alias = "message")]
    pub result_desc: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyTransactionRequest {
    pub payment_id: String,
    pub transaction_code: String,
}

// =============================================================================
// USERS + AUTH
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Member,
    Admin,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Admin => "admin",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub membership_number: Option<String>,
}

impl User {
    #[must_use]
    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim();
        if name.is_empty() { self.email.clone() } else { name.to_owned() }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub id_number: String,
    pub password: String,
}

/// Tokens + profile returned by login and registration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: User,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

// =============================================================================
// DOCUMENTS + CLAIMS
// =============================================================================

/// Document kinds offered by the upload form.
pub const DOCUMENT_TYPES: [(&str, &str); 4] = [
    ("national_id", "National ID"),
    ("payslip", "Payslip"),
    ("medical_report", "Medical report"),
    ("other", "Other"),
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub doc_type: String,
    #[serde(default)]
    pub file_url: String,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
    /// Uploader display name; only present on admin listings.
    #[serde(default)]
    pub owner_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    #[serde(alias = "_id")]
    pub id: String,
    pub category: String,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    pub status: String,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRequest {
    pub category: String,
    pub amount: f64,
    pub description: String,
}

// =============================================================================
// ADMIN
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentAnalytics {
    pub total_revenue: f64,
    pub total_transactions: u64,
    pub successful_transactions: u64,
    pub failed_transactions: u64,
    pub pending_transactions: u64,
    pub daily: Vec<DailyRevenue>,
}

impl PaymentAnalytics {
    /// Share of successful transactions as a percentage, `0.0` when empty.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn success_rate(&self) -> f64 {
        if self.total_transactions == 0 {
            return 0.0;
        }
        self.successful_transactions as f64 * 100.0 / self.total_transactions as f64
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyRevenue {
    /// `YYYY-MM-DD`.
    pub date: String,
    pub amount: f64,
    pub count: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemHealth {
    pub status: String,
    pub uptime_seconds: u64,
    pub services: Vec<ServiceHealth>,
    pub checked_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceHealth {
    pub name: String,
    pub status: String,
    pub latency_ms: Option<f64>,
    pub message: Option<String>,
}
