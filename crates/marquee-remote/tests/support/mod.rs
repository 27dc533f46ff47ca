//! In-process mock of the REST service.
//!
//! Serves `/{resource}` and `/{resource}/{id}` for any resource name with
//! mockapi-style semantics: POST assigns a string id, PUT merges fields,
//! unknown ids answer 404.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

#[derive(Clone, Default)]
pub struct MockApi {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    resources: HashMap<String, Vec<Value>>,
    raw_list: HashMap<String, (u16, String)>,
    failing_writes: HashMap<String, u16>,
    next_id: u64,
}

impl MockApi {
    pub fn new() -> Self {
        let api = Self::default();
        api.inner.lock().unwrap().next_id = 100;
        api
    }

    /// Replaces the records of `resource`.
    pub fn seed(&self, resource: &str, records: Vec<Value>) {
        self.inner
            .lock()
            .unwrap()
            .resources
            .insert(resource.to_string(), records);
    }

    /// Makes `GET /{resource}` answer with a fixed status and raw body.
    pub fn respond_raw(&self, resource: &str, status: u16, body: &str) {
        self.inner
            .lock()
            .unwrap()
            .raw_list
            .insert(resource.to_string(), (status, body.to_string()));
    }

    /// Makes POST, PUT and DELETE on `resource` answer `status` without
    /// touching its records.
    pub fn fail_writes(&self, resource: &str, status: u16) {
        self.inner
            .lock()
            .unwrap()
            .failing_writes
            .insert(resource.to_string(), status);
    }

    /// Current records of `resource`.
    pub fn records(&self, resource: &str) -> Vec<Value> {
        self.inner
            .lock()
            .unwrap()
            .resources
            .get(resource)
            .cloned()
            .unwrap_or_default()
    }

    /// Binds to port 0 and returns the base URL.
    pub async fn start(self) -> String {
        let app = Router::new()
            .route("/{resource}", get(list).post(create))
            .route("/{resource}/{id}", get(fetch).put(replace).delete(remove))
            .with_state(self);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }
}

fn id_of(record: &Value) -> String {
    match &record["id"] {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn write_failure(inner: &Inner, resource: &str) -> Option<Response> {
    inner.failing_writes.get(resource).map(|status| {
        let status = StatusCode::from_u16(*status).unwrap();
        (status, "Internal error").into_response()
    })
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(Value::String("Not found".into()))).into_response()
}

async fn list(State(api): State<MockApi>, Path(resource): Path<String>) -> Response {
    let inner = api.inner.lock().unwrap();
    if let Some((status, body)) = inner.raw_list.get(&resource) {
        let status = StatusCode::from_u16(*status).unwrap();
        return (status, body.clone()).into_response();
    }
    let records = inner.resources.get(&resource).cloned().unwrap_or_default();
    Json(records).into_response()
}

async fn create(
    State(api): State<MockApi>,
    Path(resource): Path<String>,
    Json(mut body): Json<Value>,
) -> Response {
    let mut inner = api.inner.lock().unwrap();
    if let Some(failure) = write_failure(&inner, &resource) {
        return failure;
    }
    inner.next_id += 1;
    let id = inner.next_id.to_string();
    body["id"] = Value::String(id);
    inner
        .resources
        .entry(resource)
        .or_default()
        .push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn fetch(
    State(api): State<MockApi>,
    Path((resource, id)): Path<(String, String)>,
) -> Response {
    let inner = api.inner.lock().unwrap();
    inner
        .resources
        .get(&resource)
        .and_then(|records| records.iter().find(|r| id_of(r) == id))
        .map(|r| Json(r.clone()).into_response())
        .unwrap_or_else(not_found)
}

async fn replace(
    State(api): State<MockApi>,
    Path((resource, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    let mut inner = api.inner.lock().unwrap();
    if let Some(failure) = write_failure(&inner, &resource) {
        return failure;
    }
    let Some(record) = inner
        .resources
        .get_mut(&resource)
        .and_then(|records| records.iter_mut().find(|r| id_of(r) == id))
    else {
        return not_found();
    };

    if let (Some(target), Value::Object(fields)) = (record.as_object_mut(), body) {
        for (key, value) in fields {
            if key != "id" {
                target.insert(key, value);
            }
        }
    }
    Json(record.clone()).into_response()
}

async fn remove(
    State(api): State<MockApi>,
    Path((resource, id)): Path<(String, String)>,
) -> Response {
    let mut inner = api.inner.lock().unwrap();
    if let Some(failure) = write_failure(&inner, &resource) {
        return failure;
    }
    let Some(records) = inner.resources.get_mut(&resource) else {
        return not_found();
    };
    match records.iter().position(|r| id_of(r) == id) {
        Some(index) => Json(records.remove(index)).into_response(),
        None => not_found(),
    }
}
