#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value as JsonValue};
use tokio::net::TcpListener;

pub const TOKEN: &str = "session-token";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<JsonValue>,
}

#[derive(Clone, Default)]
pub struct FakeApi {
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeApi {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn record(
        &self,
        method: Method,
        uri: &Uri,
        query: HashMap<String, String>,
        headers: &HeaderMap,
        body: Option<JsonValue>,
    ) {
        let header_value = |name: header::HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            path: uri.path().to_string(),
            query,
            authorization: header_value(header::AUTHORIZATION),
            content_type: header_value(header::CONTENT_TYPE),
            body,
        });
    }
}

pub fn candidate_json(id: &str, name: &str) -> JsonValue {
    json!({
        "id": id,
        "name": name,
        "email": format!("{}@example.com", id),
        "phone": null,
        "role": "Backend Developer",
        "experience_years": 4,
        "skills": ["Rust", "PostgreSQL"],
        "linkedin": null,
        "status": "pending",
        "notes": null,
        "created_at": "2026-01-10T09:00:00Z",
        "updated_at": "2026-01-12T15:30:00Z"
    })
}

/// Starts the fake API on an ephemeral port and returns its base URL.
pub async fn spawn_fake_api() -> (String, FakeApi) {
    let api = FakeApi::default();
    let app = Router::new()
        .route("/api/candidates", get(list_candidates).post(create_candidate))
        .route(
            "/api/candidates/:id",
            get(get_candidate)
                .put(update_candidate)
                .delete(delete_candidate),
        )
        .route("/api/dashboard/stats", get(dashboard_stats))
        .route("/api/export/excel", get(export_excel))
        .route("/api/export/pdf", get(export_pdf))
        .with_state(api.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/api", addr), api)
}

/// A base URL nothing is listening on.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api", addr)
}

async fn list_candidates(
    State(api): State<FakeApi>,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    api.record(Method::GET, &uri, query.clone(), &headers, None);

    if query.get("search").map(String::as_str) == Some("explode") {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "message": "Database unavailable" })),
        )
            .into_response();
    }

    let page: u32 = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let items: Vec<JsonValue> = (1..=9)
        .map(|i| candidate_json(&format!("c{}", (page - 1) * 9 + i), "Ana Costa"))
        .collect();
    Json(json!({
        "success": true,
        "data": items,
        "pagination": { "total": 23, "page": page, "limit": 9, "totalPages": 3 }
    }))
    .into_response()
}

async fn get_candidate(
    State(api): State<FakeApi>,
    uri: Uri,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    api.record(Method::GET, &uri, HashMap::new(), &headers, None);

    if headers.get(header::AUTHORIZATION).is_none() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Token not provided" })),
        )
            .into_response();
    }
    if id == "missing" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "message": "Candidate not found" })),
        )
            .into_response();
    }
    if id == "teapot" {
        return (StatusCode::IM_A_TEAPOT, "not json at all").into_response();
    }
    Json(json!({ "success": true, "data": candidate_json(&id, "Ana Costa") })).into_response()
}

async fn create_candidate(
    State(api): State<FakeApi>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<JsonValue>,
) -> Response {
    api.record(Method::POST, &uri, HashMap::new(), &headers, Some(body.clone()));

    if body["email"] == "taken@example.com" {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "success": false, "message": "E-mail already registered" })),
        )
            .into_response();
    }
    let mut created = candidate_json("new-1", body["name"].as_str().unwrap_or_default());
    created["email"] = body["email"].clone();
    created["role"] = body["role"].clone();
    created["skills"] = body["skills"].clone();
    (
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": created })),
    )
        .into_response()
}

async fn update_candidate(
    State(api): State<FakeApi>,
    uri: Uri,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<JsonValue>,
) -> Response {
    api.record(Method::PUT, &uri, HashMap::new(), &headers, Some(body.clone()));

    let mut updated = candidate_json(&id, "Ana Costa");
    if let Some(status) = body.get("status") {
        updated["status"] = status.clone();
    }
    Json(json!({ "success": true, "data": updated })).into_response()
}

async fn delete_candidate(
    State(api): State<FakeApi>,
    uri: Uri,
    headers: HeaderMap,
    Path(_id): Path<String>,
) -> Response {
    api.record(Method::DELETE, &uri, HashMap::new(), &headers, None);
    Json(json!({ "success": true, "message": "Candidate removed" })).into_response()
}

async fn dashboard_stats(State(api): State<FakeApi>, uri: Uri, headers: HeaderMap) -> Response {
    api.record(Method::GET, &uri, HashMap::new(), &headers, None);
    Json(json!({
        "success": true,
        "data": {
            "total": 23,
            "pending": 10,
            "approved": 8,
            "rejected": 5,
            "approvalRate": 34.8,
            "recentCount": 4,
            "topRoles": [
                { "role": "Backend Developer", "count": 9 },
                { "role": "Designer", "count": 3 }
            ]
        }
    }))
    .into_response()
}

async fn export_excel(State(api): State<FakeApi>, uri: Uri, headers: HeaderMap) -> Response {
    api.record(Method::GET, &uri, HashMap::new(), &headers, None);
    (
        StatusCode::OK,
        [(
            header::CONTENT_TYPE,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        )],
        vec![0x50u8, 0x4b, 0x03, 0x04, 0x14, 0x00],
    )
        .into_response()
}

async fn export_pdf(State(api): State<FakeApi>, uri: Uri, headers: HeaderMap) -> Response {
    api.record(Method::GET, &uri, HashMap::new(), &headers, None);
    (StatusCode::INTERNAL_SERVER_ERROR, "report generator crashed").into_response()
}
