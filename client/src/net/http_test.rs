use std::cell::{Cell, RefCell};
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::executor::block_on;

use super::*;
use crate::net::test_support::{FakeTransport, reply};
use crate::util::storage::MemoryStorage;

struct Harness {
    client: ApiClient<FakeTransport, MemoryStorage>,
    local: MemoryStorage,
    session: MemoryStorage,
    redirects: Rc<Cell<u32>>,
}

fn harness(replies: Vec<Result<HttpResponse, ApiError>>) -> Harness {
    let local = MemoryStorage::new();
    let session = MemoryStorage::new();
    let redirects = Rc::new(Cell::new(0));
    let counter = redirects.clone();
    let client = ApiClient::new(
        FakeTransport::with(replies),
        TokenStore::new(local.clone(), session.clone()),
        Rc::new(move || counter.set(counter.get() + 1)),
    );
    Harness { client, local, session, redirects }
}

#[derive(Debug, serde::Deserialize, PartialEq)]
struct Plan {
    id: String,
}

#[test]
fn attaches_bearer_token_and_decodes_body() {
    let h = harness(vec![reply(200, r#"[{"id":"p1"}]"#)]);
    h.client.tokens().save("t1", Some("r1"), true);

    let plans: Vec<Plan> = block_on(h.client.get("/plans")).expect("plans");

    assert_eq!(plans, vec![Plan { id: "p1".to_owned() }]);
    let sent = h.client.transport.sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].bearer.as_deref(), Some("t1"));
    assert_eq!(sent[0].method, Method::Get);
}

#[test]
fn unauthorized_with_refresh_token_retries_exactly_once_with_new_token() {
    let h = harness(vec![
        reply(401, r#"{"message":"jwt expired"}"#),
        reply(200, r#"{"token":"t2","refreshToken":"r2"}"#),
        reply(200, r#"[{"id":"p1"}]"#),
    ]);
    h.client.tokens().save("t1", Some("r1"), false);

    let plans: Vec<Plan> = block_on(h.client.get("/plans")).expect("plans after refresh");

    assert_eq!(plans.len(), 1);
    let sent = h.client.transport.sent.borrow();
    assert_eq!(sent.len(), 3);
    assert_eq!(sent[1].path, REFRESH_ENDPOINT);
    assert_eq!(sent[1].bearer, None);
    assert_eq!(
        sent[1].body,
        Some(RequestBody::Json(r#"{"refreshToken":"r1"}"#.to_owned()))
    );
    assert_eq!(sent[2].path, "/plans");
    assert_eq!(sent[2].bearer.as_deref(), Some("t2"));
    assert_eq!(h.session.get("token").as_deref(), Some("t2"));
    assert_eq!(h.session.get("refreshToken").as_deref(), Some("r2"));
    assert_eq!(h.redirects.get(), 0);
}

#[test]
fn second_unauthorized_after_refresh_is_returned_without_another_refresh() {
    let h = harness(vec![
        reply(401, ""),
        reply(200, r#"{"token":"t2"}"#),
        reply(401, r#"{"message":"still no"}"#),
    ]);
    h.client.tokens().save("t1", Some("r1"), true);

    let err = block_on(h.client.get::<Vec<Plan>>("/plans")).expect_err("should fail");

    assert_eq!(err, ApiError::Api { status: 401, message: "still no".to_owned() });
    assert_eq!(h.client.transport.sent.borrow().len(), 3);
    assert_eq!(h.redirects.get(), 0);
}

#[test]
fn missing_refresh_token_clears_storage_and_redirects() {
    let h = harness(vec![reply(401, "")]);
    h.local.set("token", "t1");

    let err = block_on(h.client.get::<Vec<Plan>>("/subscriptions/me")).expect_err("should fail");

    assert_eq!(err, ApiError::SessionExpired);
    assert_eq!(h.client.transport.sent.borrow().len(), 1);
    assert!(h.local.is_empty());
    assert!(h.session.is_empty());
    assert_eq!(h.redirects.get(), 1);
}

#[test]
fn rejected_refresh_clears_storage_and_redirects() {
    let h = harness(vec![reply(401, ""), reply(401, r#"{"message":"invalid refresh token"}"#)]);
    h.client.tokens().save("t1", Some("bad"), true);

    let err = block_on(h.client.get::<Vec<Plan>>("/documents")).expect_err("should fail");

    assert_eq!(err, ApiError::SessionExpired);
    assert_eq!(h.client.transport.sent.borrow().len(), 2);
    assert!(h.local.is_empty());
    assert_eq!(h.redirects.get(), 1);
}

#[test]
fn auth_endpoints_never_trigger_refresh() {
    let h = harness(vec![reply(401, r#"{"message":"Invalid email or password"}"#)]);
    h.client.tokens().save("t1", Some("r1"), true);

    let err = block_on(h.client.send_json::<_, serde_json::Value>(
        Method::Post,
        "/auth/login",
        &serde_json::json!({"email":"a@b.co","password":"x"}),
    ))
    .expect_err("should fail");

    assert_eq!(err.to_string(), "Invalid email or password");
    assert_eq!(h.client.transport.sent.borrow().len(), 1);
    assert_eq!(h.client.tokens().access_token().as_deref(), Some("t1"));
    assert_eq!(h.redirects.get(), 0);
}

#[test]
fn network_failure_is_reported_as_network_error() {
    let h = harness(vec![Err(ApiError::Network("offline".to_owned()))]);
    let err = block_on(h.client.get::<Vec<Plan>>("/plans")).expect_err("should fail");
    assert!(matches!(err, ApiError::Network(_)));
}

#[test]
fn non_success_status_is_normalized() {
    let h = harness(vec![reply(503, "<html>bad gateway</html>")]);
    let err = block_on(h.client.get::<Vec<Plan>>("/plans")).expect_err("should fail");
    assert_eq!(err, ApiError::Api { status: 503, message: "Server error. Please try again later.".to_owned() });
}

#[test]
fn decode_unwraps_data_envelope() {
    let h = harness(vec![reply(200, r#"{"success":true,"data":{"id":"p9"}}"#)]);
    let plan: Plan = block_on(h.client.get("/plans/p9")).expect("plan");
    assert_eq!(plan.id, "p9");
}

#[test]
fn envelope_is_preferred_for_all_default_payloads() {
    let h = harness(vec![
        reply(200, r#"{"success":true,"data":{"totalRevenue":5000,"totalTransactions":4,"successfulTransactions":3}}"#),
        reply(200, r#"{"success":true,"data":{"status":"healthy","uptimeSeconds":86400}}"#),
    ]);

    let analytics: crate::net::types::PaymentAnalytics =
        block_on(h.client.get("/admin/payments/analytics?days=30")).expect("analytics");
    let health: crate::net::types::SystemHealth = block_on(h.client.get("/admin/health")).expect("health");

    assert!((analytics.total_revenue - 5000.0).abs() < f64::EPSILON);
    assert_eq!(analytics.successful_transactions, 3);
    assert_eq!(health.status, "healthy");
    assert_eq!(health.uptime_seconds, 86_400);
}

#[test]
fn bare_payload_without_envelope_still_decodes() {
    let h = harness(vec![reply(200, r#"{"totalRevenue":1200}"#)]);
    let analytics: crate::net::types::PaymentAnalytics =
        block_on(h.client.get("/admin/payments/analytics?days=7")).expect("analytics");
    assert!((analytics.total_revenue - 1200.0).abs() < f64::EPSILON);
}

#[test]
fn decode_failure_is_reported() {
    let h = harness(vec![reply(200, r#"{"unexpected":true}"#)]);
    let err = block_on(h.client.get::<Plan>("/plans/p9")).expect_err("should fail");
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn execute_ignores_response_body() {
    let h = harness(vec![reply(200, r#"{"message":"Document deleted"}"#)]);
    block_on(h.client.execute(Method::Delete, "/documents/d1", None)).expect("delete");
    assert_eq!(h.client.transport.sent.borrow()[0].method, Method::Delete);
}

#[test]
fn auth_endpoint_detection() {
    assert!(is_auth_endpoint("/auth/login"));
    assert!(is_auth_endpoint("/auth/refresh-token"));
    assert!(!is_auth_endpoint("/authors"));
    assert!(!is_auth_endpoint("/plans"));
}

/// Yields to the executor once before completing.
#[derive(Default)]
struct YieldOnce(bool);

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            Poll::Ready(())
        } else {
            self.0 = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

/// Backend with rotating refresh tokens: each refresh token works once.
struct RotatingBackend {
    access: RefCell<Option<String>>,
    refresh: RefCell<String>,
    issued: Cell<u32>,
    sent: RefCell<Vec<HttpRequest>>,
}

impl RotatingBackend {
    fn new(refresh: &str) -> Self {
        Self {
            access: RefCell::new(None),
            refresh: RefCell::new(refresh.to_owned()),
            issued: Cell::new(1),
            sent: RefCell::default(),
        }
    }

    fn refresh_calls(&self) -> usize {
        self.sent.borrow().iter().filter(|r| r.path == REFRESH_ENDPOINT).count()
    }
}

impl Transport for RotatingBackend {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.sent.borrow_mut().push(request.clone());
        YieldOnce::default().await;

        if request.path == REFRESH_ENDPOINT {
            let expected = format!(r#"{{"refreshToken":"{}"}}"#, self.refresh.borrow());
            if request.body != Some(RequestBody::Json(expected)) {
                return Ok(HttpResponse { status: 401, body: r#"{"message":"invalid refresh token"}"#.to_owned() });
            }
            let n = self.issued.get() + 1;
            self.issued.set(n);
            *self.access.borrow_mut() = Some(format!("t{n}"));
            *self.refresh.borrow_mut() = format!("r{n}");
            return Ok(HttpResponse { status: 200, body: format!(r#"{{"token":"t{n}","refreshToken":"r{n}"}}"#) });
        }

        if request.bearer.is_some() && request.bearer == *self.access.borrow() {
            Ok(HttpResponse { status: 200, body: "[]".to_owned() })
        } else {
            Ok(HttpResponse { status: 401, body: r#"{"message":"jwt expired"}"#.to_owned() })
        }
    }
}

#[test]
fn concurrent_unauthorized_requests_share_one_refresh() {
    let local = MemoryStorage::new();
    let session = MemoryStorage::new();
    let redirects = Rc::new(Cell::new(0));
    let counter = redirects.clone();
    let client = ApiClient::new(
        RotatingBackend::new("r1"),
        TokenStore::new(local, session.clone()),
        Rc::new(move || counter.set(counter.get() + 1)),
    );
    client.tokens().save("t1", Some("r1"), false);

    let (a, b) = block_on(async { futures::join!(client.get::<Vec<Plan>>("/plans"), client.get::<Vec<Plan>>("/payments")) });

    assert_eq!(a, Ok(Vec::new()));
    assert_eq!(b, Ok(Vec::new()));
    assert_eq!(client.transport.refresh_calls(), 1);
    assert_eq!(redirects.get(), 0);
    assert_eq!(session.get("token").as_deref(), Some("t2"));
    assert_eq!(session.get("refreshToken").as_deref(), Some("r2"));
}
