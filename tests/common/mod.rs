//! Shared fixtures: an in-memory transport keyed by URL and a small contest.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::collections::HashMap;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use domjudge_cli::{ApiClient, ClientError, Result, Transport};
use serde_json::{json, Value};

pub const BASE_URL: &str = "http://judge.test/api/v4/";

/// Serves canned JSON per URL and remembers every URL requested.
#[derive(Default)]
pub struct FakeTransport {
    responses: HashMap<String, Value>,
    requests: Rc<RefCell<Vec<String>>>,
}

impl FakeTransport {
    pub fn with(mut self, path: &str, body: Value) -> Self {
        self.responses.insert(format!("{BASE_URL}{path}"), body);
        self
    }

    /// Handle on the request log that outlives moving the transport into a client.
    pub fn request_log(&self) -> Rc<RefCell<Vec<String>>> {
        Rc::clone(&self.requests)
    }
}

impl Transport for FakeTransport {
    fn get_json(&self, url: &str) -> Result<Value> {
        self.requests.borrow_mut().push(url.to_owned());
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| ClientError::Status {
                url: url.to_owned(),
                status: reqwest::StatusCode::NOT_FOUND,
                body: String::new(),
            })
    }
}

pub fn contests() -> Value {
    json!([
        {
            "id": 1,
            "formal_name": "Spring Contest",
            "shortname": "spring",
            "start_time": "2024-04-01T10:00:00+02:00",
            "end_time": "2024-04-01T15:00:00+02:00",
        }
    ])
}

pub fn teams() -> Value {
    json!([
        {"id": 1, "name": "Alice"},
        {"id": "2", "name": "Bob"},
    ])
}

pub fn problems() -> Value {
    json!([
        {"id": 10, "name": "Hello World", "short_name": "A"},
        {"id": 11, "name": "Sorting", "short_name": "B"},
    ])
}

pub fn submissions() -> Value {
    json!([
        {"id": 42, "team_id": 1, "problem_id": 10, "language_id": "cpp", "time": "2024-04-01T10:15:00+02:00"},
        {"id": 43, "team_id": 2, "problem_id": 11, "language_id": "py3", "time": "2024-04-01T11:00:00+02:00"},
    ])
}

pub fn judgements() -> Value {
    json!([
        {"id": 7, "submission_id": 43, "judgement_type_id": "WA", "max_run_time": 0.5},
        {"id": 6, "submission_id": 42, "judgement_type_id": "AC", "max_run_time": 0.125},
    ])
}

pub fn source(submission_id: i64, text: &str) -> Value {
    json!([
        {"id": submission_id * 10, "submission_id": submission_id, "source": STANDARD.encode(text)}
    ])
}

/// Contest 1 with two teams, two problems and two judged submissions.
pub fn contest_transport() -> FakeTransport {
    FakeTransport::default()
        .with("contests", contests())
        .with("contests/1/teams", teams())
        .with("contests/1/problems", problems())
        .with("contests/1/submissions", submissions())
        .with("contests/1/judgements", judgements())
        .with(
            "contests/1/submissions/42/source-code",
            source(42, "int main(){}\r\n"),
        )
        .with(
            "contests/1/submissions/43/source-code",
            source(43, "print('hi')\n"),
        )
}

pub fn client(transport: FakeTransport) -> ApiClient<FakeTransport> {
    ApiClient::with_transport(transport, BASE_URL)
}
