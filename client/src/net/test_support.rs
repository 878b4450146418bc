//! Scripted transport shared by the networking tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use super::error::ApiError;
use super::http::{HttpRequest, HttpResponse, Transport};
use super::types::{Role, User};

/// Pops one canned reply per request and records every request sent.
#[derive(Default)]
pub(crate) struct FakeTransport {
    replies: RefCell<VecDeque<Result<HttpResponse, ApiError>>>,
    pub(crate) sent: RefCell<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub(crate) fn with(replies: Vec<Result<HttpResponse, ApiError>>) -> Self {
        Self { replies: RefCell::new(replies.into()), sent: RefCell::default() }
    }
}

impl Transport for FakeTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.sent.borrow_mut().push(request.clone());
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted reply".to_owned())))
    }
}

pub(crate) fn reply(status: u16, body: &str) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse { status, body: body.to_owned() })
}

pub(crate) fn user(id: &str, role: Role) -> User {
    User {
        id: id.to_owned(),
        first_name: "Jane".to_owned(),
        last_name: "Wanjiku".to_owned(),
        email: format!("{id}@example.co.ke"),
        phone_number: "254712345678".to_owned(),
        role,
        is_active: true,
        membership_number: Some("MBR-0001".to_owned()),
    }
}
