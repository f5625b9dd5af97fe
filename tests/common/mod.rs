//! In-memory stand-in for the organizations/users/membership endpoints.

#![allow(dead_code)]

use influxdb_client::{Configuration, ConfigurationBuilder, InfluxClient, TokenAuth};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use wiremock::matchers::path_regex;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const TOKEN: &str = "my-token";

#[derive(Default)]
struct State {
    next_id: u64,
    orgs: BTreeMap<String, Value>,
    users: BTreeMap<String, Value>,
    // (org id, user id, role)
    mappings: Vec<(String, String, &'static str)>,
}

impl State {
    fn new_id(&mut self) -> String {
        self.next_id += 1;
        format!("{:016x}", 0x0a00_0000_0000_0000u64 + self.next_id)
    }
}

/// Stateful fake of the `/api/v2` org and user endpoints
#[derive(Clone, Default)]
pub struct FakeInflux {
    state: Arc<Mutex<State>>,
}

fn org_json(id: &str, name: &str, description: Option<&Value>) -> Value {
    let mut org = json!({
        "id": id,
        "name": name,
        "status": "active",
        "createdAt": "2024-01-02T03:04:05Z",
        "updatedAt": "2024-01-02T03:04:05Z",
        "links": {
            "buckets": format!("/api/v2/buckets?org={}", name),
            "dashboards": format!("/api/v2/dashboards?org={}", name),
            "log": format!("/api/v2/orgs/{}/log", id),
            "members": format!("/api/v2/orgs/{}/members", id),
            "self": format!("/api/v2/orgs/{}", id),
            "tasks": format!("/api/v2/tasks?org={}", name),
        }
    });
    if let Some(description) = description {
        org["description"] = description.clone();
    }
    org
}

fn not_found(what: &str) -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(json!({
        "code": "not found",
        "message": format!("{} not found", what),
    }))
}

fn bad_request(message: &str) -> ResponseTemplate {
    ResponseTemplate::new(400).set_body_json(json!({
        "code": "invalid",
        "message": message,
    }))
}

impl FakeInflux {
    fn handle(&self, request: &Request) -> ResponseTemplate {
        let authorized = request
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            == Some(&format!("Token {}", TOKEN)[..]);
        if !authorized {
            return ResponseTemplate::new(401).set_body_json(json!({
                "code": "unauthorized",
                "message": "unauthorized access",
            }));
        }

        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
        let segments: Vec<&str> = request
            .url
            .path_segments()
            .map(|s| s.collect())
            .unwrap_or_default();
        let method = request.method.as_str();
        let mut state = self.state.lock().unwrap();

        match (method, &segments[..]) {
            ("GET", ["api", "v2", "orgs"]) => {
                let orgs: Vec<Value> = state.orgs.values().cloned().collect();
                ResponseTemplate::new(200).set_body_json(json!({
                    "links": { "self": "/api/v2/orgs" },
                    "orgs": orgs,
                }))
            }
            ("POST", ["api", "v2", "orgs"]) => {
                let Some(name) = body["name"].as_str() else {
                    return bad_request("name is required");
                };
                let id = state.new_id();
                let org = org_json(&id, name, body.get("description"));
                state.orgs.insert(id, org.clone());
                ResponseTemplate::new(201).set_body_json(org)
            }
            ("GET", ["api", "v2", "orgs", id]) => match state.orgs.get(*id) {
                Some(org) => ResponseTemplate::new(200).set_body_json(org.clone()),
                None => not_found("organization"),
            },
            ("PATCH", ["api", "v2", "orgs", id]) => {
                let Some(existing) = state.orgs.get(*id).cloned() else {
                    return not_found("organization");
                };
                let name = body["name"]
                    .as_str()
                    .or(existing["name"].as_str())
                    .unwrap_or_default()
                    .to_string();
                let description = body.get("description").or(existing.get("description"));
                let org = org_json(id, &name, description);
                state.orgs.insert(id.to_string(), org.clone());
                ResponseTemplate::new(200).set_body_json(org)
            }
            ("DELETE", ["api", "v2", "orgs", id]) => match state.orgs.remove(*id) {
                Some(_) => {
                    state.mappings.retain(|(org, _, _)| org.as_str() != *id);
                    ResponseTemplate::new(204)
                }
                None => not_found("organization"),
            },
            ("GET", ["api", "v2", "orgs", id, kind @ ("members" | "owners")]) => {
                if !state.orgs.contains_key(*id) {
                    return not_found("organization");
                }
                let role = if *kind == "members" { "member" } else { "owner" };
                let users: Vec<Value> = state
                    .mappings
                    .iter()
                    .filter(|(org, _, r)| org.as_str() == *id && *r == role)
                    .filter_map(|(_, user, _)| state.users.get(user))
                    .map(|user| {
                        let mut user = user.clone();
                        user["role"] = json!(role);
                        user
                    })
                    .collect();
                ResponseTemplate::new(200).set_body_json(json!({
                    "links": { "self": format!("/api/v2/orgs/{}/{}", id, kind) },
                    "users": users,
                }))
            }
            ("POST", ["api", "v2", "orgs", id, kind @ ("members" | "owners")]) => {
                if !state.orgs.contains_key(*id) {
                    return not_found("organization");
                }
                let Some(user_id) = body["id"].as_str().map(str::to_string) else {
                    return bad_request("user id is required");
                };
                let Some(user) = state.users.get(&user_id).cloned() else {
                    return not_found("user");
                };
                let role = if *kind == "members" { "member" } else { "owner" };
                state.mappings.push((id.to_string(), user_id, role));
                let mut member = user;
                member["role"] = json!(role);
                ResponseTemplate::new(201).set_body_json(member)
            }
            ("DELETE", ["api", "v2", "orgs", id, kind @ ("members" | "owners"), user_id]) => {
                let role = if *kind == "members" { "member" } else { "owner" };
                state
                    .mappings
                    .retain(|(org, user, r)| !(org.as_str() == *id && user.as_str() == *user_id && *r == role));
                ResponseTemplate::new(204)
            }
            ("GET", ["api", "v2", "users"]) => {
                let users: Vec<Value> = state.users.values().cloned().collect();
                ResponseTemplate::new(200).set_body_json(json!({ "users": users }))
            }
            ("POST", ["api", "v2", "users"]) => {
                let Some(name) = body["name"].as_str().map(str::to_string) else {
                    return bad_request("name is required");
                };
                let id = state.new_id();
                let user = json!({
                    "id": id,
                    "name": name,
                    "status": "active",
                    "links": { "self": format!("/api/v2/users/{}", id) },
                });
                state.users.insert(id, user.clone());
                ResponseTemplate::new(201).set_body_json(user)
            }
            ("GET", ["api", "v2", "users", id]) => match state.users.get(*id) {
                Some(user) => ResponseTemplate::new(200).set_body_json(user.clone()),
                None => not_found("user"),
            },
            ("DELETE", ["api", "v2", "users", id]) => match state.users.remove(*id) {
                Some(_) => {
                    state.mappings.retain(|(_, user, _)| user.as_str() != *id);
                    ResponseTemplate::new(204)
                }
                None => not_found("user"),
            },
            _ => ResponseTemplate::new(405),
        }
    }
}

impl Respond for FakeInflux {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        self.handle(request)
    }
}

/// Start a mock server backed by a fresh [`FakeInflux`]
pub async fn start_fake_influx() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(path_regex(r"^/api/v2/(orgs|users)"))
        .respond_with(FakeInflux::default())
        .mount(&server)
        .await;
    server
}

/// Configuration pointing at `server` with the fake's token
pub fn test_config(server: &MockServer) -> ConfigurationBuilder {
    Configuration::builder(server.uri())
        .expect("mock server uri is a valid base url")
        .auth(TokenAuth::new(TOKEN))
}

pub fn test_client(server: &MockServer) -> InfluxClient {
    InfluxClient::new(test_config(server).build()).expect("Failed to create client")
}

/// Unique resource name with the given prefix
pub fn generate_name(prefix: &str) -> String {
    format!("{}_{}", prefix, uuid::Uuid::new_v4().simple())
}
