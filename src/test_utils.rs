// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes list and watch responses.

use http::{Request, Response};
use kube::client::Body;
use kube::Client;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// A mock HTTP service that returns predefined responses based on request paths.
///
/// Watch requests (`?watch=true`) are matched separately from plain GETs, so a
/// collection path can serve both its list and its watch.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
    requests: Arc<Mutex<Vec<String>>>,
    accept_headers: Arc<Mutex<Vec<String>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            accept_headers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a response for list (GET) requests matching the exact path
    pub fn on_list(self, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(("GET".to_string(), path.to_string()), (status, body.to_string()));
        self
    }

    /// Add a watch response for the path, one JSON event per line
    pub fn on_watch(self, path: &str, events: &[Value]) -> Self {
        let body = events
            .iter()
            .map(|e| format!("{}\n", e))
            .collect::<String>();
        self.responses
            .lock()
            .unwrap()
            .insert(("WATCH".to_string(), path.to_string()), (200, body));
        self
    }

    /// Every request seen so far, as "VERB path?query"
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// The Accept header of every request seen so far, empty when absent
    pub fn accept_headers(&self) -> Vec<String> {
        self.accept_headers.lock().unwrap().clone()
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    fn find_response(&self, verb: &str, path: &str) -> Option<(u16, String)> {
        self.responses
            .lock()
            .unwrap()
            .get(&(verb.to_string(), path.to_string()))
            .cloned()
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let path = req.uri().path().to_string();
        let query = req.uri().query().unwrap_or_default().to_string();
        let verb = if query.split('&').any(|p| p == "watch=true") {
            "WATCH"
        } else {
            req.method().as_str()
        };

        self.requests
            .lock()
            .unwrap()
            .push(format!("{} {}?{}", verb, path, query));
        let accept = req
            .headers()
            .get(http::header::ACCEPT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        self.accept_headers.lock().unwrap().push(accept);
        let response = self.find_response(verb, &path);

        Box::pin(async move {
            match response {
                Some((status, body)) => Ok(Response::builder()
                    .status(status)
                    .header("content-type", "application/json")
                    .body(Body::from(body.into_bytes()))
                    .unwrap()),
                None => {
                    // Default 404 for unmatched requests
                    let body = not_found_json("resource", &path);
                    Ok(Response::builder()
                        .status(404)
                        .header("content-type", "application/json")
                        .body(Body::from(body.into_bytes()))
                        .unwrap())
                }
            }
        })
    }
}

/// A Job with the given succeeded count
pub fn job_json(name: &str, resource_version: &str, succeeded: i32) -> Value {
    serde_json::json!({
        "apiVersion": "batch/v1",
        "kind": "Job",
        "metadata": {
            "name": name,
            "namespace": "default",
            "resourceVersion": resource_version,
            "uid": format!("uid-{}", name)
        },
        "status": {
            "succeeded": succeeded
        }
    })
}

/// Metadata of a Secret, as served to metadata-only requests
pub fn secret_meta_json(name: &str, resource_version: &str) -> Value {
    serde_json::json!({
        "apiVersion": "meta.k8s.io/v1",
        "kind": "PartialObjectMetadata",
        "metadata": {
            "name": name,
            "namespace": "default",
            "resourceVersion": resource_version,
            "uid": format!("uid-{}", name)
        }
    })
}

/// A list response wrapping `items`
pub fn list_json(kind: &str, api_version: &str, resource_version: &str, items: Vec<Value>) -> String {
    serde_json::json!({
        "apiVersion": api_version,
        "kind": format!("{}List", kind),
        "metadata": {
            "resourceVersion": resource_version
        },
        "items": items
    })
    .to_string()
}

/// A watch event line payload
pub fn watch_event(event_type: &str, object: Value) -> Value {
    serde_json::json!({
        "type": event_type,
        "object": object
    })
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("{} \"{}\" not found", resource, name),
        "reason": "NotFound",
        "code": 404
    })
    .to_string()
}
