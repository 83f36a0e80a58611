//! `ApiClient` against an in-process axum backend.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use farmhub_adapter_http_reqwest::{ApiClient, ApiConfig};
use farmhub_app::context::SessionContext;
use farmhub_app::editor::{EditorMode, EditorState, RuleEditor, SubmitOutcome};
use farmhub_app::ports::{DeviceGateway, FarmGateway, RuleGateway};
use farmhub_app::services::rule_service::RuleService;
use farmhub_domain::error::FarmhubError;
use farmhub_domain::farm::FarmRole;
use farmhub_domain::id::{FarmId, RuleId};
use farmhub_domain::rule::{Action, Condition, DurationValue, Operator, Rule};
use serde_json::{Value, json};

#[derive(Debug, Clone)]
struct Seen {
    request: String,
    auth: Option<String>,
    body: Option<Value>,
}

#[derive(Clone, Default)]
struct Backend {
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl Backend {
    fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }

    fn requests(&self) -> Vec<String> {
        self.seen().into_iter().map(|s| s.request).collect()
    }
}

fn stored_rule() -> Value {
    json!({
        "id": 12,
        "name": "Night irrigation",
        "description": "water at night",
        "farmId": 7,
        "farmName": "Green Valley",
        "enabled": false,
        "priority": 0,
        "conditions": [
            {"id": 1, "type": "TIME_RANGE", "value": "22:00-06:00", "orderIndex": 0},
            {"id": 2, "type": "SENSOR_VALUE", "deviceId": "DHT22-001", "field": "soil_moisture",
             "operator": "LESS_THAN", "value": "30", "logicalOperator": "AND", "orderIndex": 1}
        ],
        "actions": [
            {"id": 1, "type": "TURN_ON_DEVICE", "deviceId": "PUMP-001", "durationSeconds": 600}
        ],
        "executionCount": 4,
        "createdAt": "2024-05-01T10:00:00"
    })
}

async fn handle(
    State(backend): State<Backend>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let path = uri.path().trim_start_matches("/api").to_string();
    let request = match uri.query() {
        Some(query) => format!("{method} {path}?{query}"),
        None => format!("{method} {path}"),
    };
    let body: Option<Value> = serde_json::from_str(&body).ok();
    backend.seen.lock().unwrap().push(Seen {
        request,
        auth: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: body.clone(),
    });

    match (method, path.as_str()) {
        (Method::GET, "/farms") => Reply::ok(json!({
            "success": true,
            "data": [
                {"id": 7, "name": "Green Valley", "currentUserRole": "OPERATOR"},
                {"id": 8, "name": "Hill Side", "currentUserRole": "VIEWER"}
            ]
        })),
        (Method::GET, "/devices") => Reply::ok(json!([
            {"deviceId": "DHT22-001", "name": "Soil probe", "type": "SENSOR_DHT22", "status": "ONLINE"},
            {"deviceId": "PUMP-001", "name": "Pump", "type": "ACTUATOR_PUMP", "status": "OFFLINE"},
            {"deviceId": "GW-001", "name": "Gateway", "type": "GATEWAY"}
        ])),
        (Method::GET, "/rules") => Reply::ok(json!({"data": [stored_rule()]})),
        (Method::GET, "/rules/12") => Reply::ok(json!({"data": stored_rule()})),
        (Method::GET, "/rules/13") => (StatusCode::OK, "<html>maintenance</html>").into_response(),
        (Method::GET, "/rules/500") => Reply::status(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"error": "database unavailable"}),
        ),
        (Method::POST, "/rules") => {
            let mut created = body.unwrap_or_default();
            created["id"] = json!(13);
            Reply::status(StatusCode::CREATED, json!({"data": created}))
        }
        (Method::PUT, "/rules/12") => Reply::ok(body.unwrap_or_default()),
        (Method::PATCH, "/rules/12/toggle") => Reply::ok(json!({"success": true})),
        (Method::DELETE, "/rules/12") => StatusCode::NO_CONTENT.into_response(),
        _ => Reply::status(StatusCode::NOT_FOUND, json!({"message": "Rule not found"})),
    }
}

struct Reply;

impl Reply {
    fn ok(value: Value) -> Response {
        Self::status(StatusCode::OK, value)
    }

    fn status(status: StatusCode, value: Value) -> Response {
        (status, axum::Json(value)).into_response()
    }
}

async fn spawn_backend() -> (Backend, String) {
    let backend = Backend::default();
    let app = Router::new().fallback(handle).with_state(backend.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (backend, format!("http://{addr}/api"))
}

fn client(base_url: &str, session: &SessionContext) -> ApiClient {
    let config = ApiConfig {
        base_url: base_url.to_string(),
        ..ApiConfig::default()
    };
    ApiClient::new(&config, session).unwrap()
}

fn signed_in() -> SessionContext {
    SessionContext::new()
        .with_token("secret-token")
        .with_farm(FarmId::new(7))
}

#[tokio::test]
async fn should_send_bearer_token_and_unwrap_envelope() {
    let (backend, url) = spawn_backend().await;
    let client = client(&url, &signed_in());

    let farms = client.list_farms().await.unwrap();

    assert_eq!(farms.len(), 2);
    assert_eq!(farms[0].current_user_role, Some(FarmRole::Operator));
    let seen = backend.seen();
    assert_eq!(seen[0].request, "GET /farms");
    assert_eq!(seen[0].auth.as_deref(), Some("Bearer secret-token"));
}

#[tokio::test]
async fn should_list_devices_with_data_for_farm() {
    let (backend, url) = spawn_backend().await;
    let client = client(&url, &signed_in());

    let devices = client.list_devices(FarmId::new(7)).await.unwrap();

    assert_eq!(devices.len(), 3);
    assert_eq!(devices[1].kind, "ACTUATOR_PUMP");
    assert_eq!(
        backend.requests(),
        ["GET /devices?farmId=7&withData=true"]
    );
}

#[tokio::test]
async fn should_fetch_rule_ignoring_backend_bookkeeping_fields() {
    let (_backend, url) = spawn_backend().await;
    let client = client(&url, &signed_in());

    let rule = client.get_by_id(RuleId::new(12)).await.unwrap().unwrap();

    assert_eq!(rule.id, Some(RuleId::new(12)));
    assert!(!rule.enabled);
    assert_eq!(rule.conditions.len(), 2);
    assert_eq!(rule.actions[0].duration_seconds, Some(DurationValue::Seconds(600)));
}

#[tokio::test]
async fn should_report_missing_rule_as_not_found() {
    let (_backend, url) = spawn_backend().await;
    let client = client(&url, &signed_in());

    assert!(client.get_by_id(RuleId::new(99)).await.unwrap().is_none());

    let result = RuleService::new(client).get_rule(RuleId::new(99)).await;
    assert!(matches!(result, Err(FarmhubError::NotFound(_))));
}

#[tokio::test]
async fn should_post_rule_to_farm_without_id() {
    let (backend, url) = spawn_backend().await;
    let client = client(&url, &signed_in());
    let rule = Rule::builder()
        .name("Cool down")
        .condition(Condition::sensor_value(
            "DHT22-001",
            "temperature",
            Operator::GreaterThan,
            "32",
        ))
        .action(Action::turn_on("FAN-001", Some(300)))
        .build()
        .unwrap();

    let created = client.create(FarmId::new(7), rule).await.unwrap();

    assert_eq!(created.id, Some(RuleId::new(13)));
    let seen = backend.seen();
    assert_eq!(seen[0].request, "POST /rules?farmId=7");
    assert_eq!(
        seen[0].body,
        Some(json!({
            "name": "Cool down",
            "enabled": true,
            "conditions": [{
                "type": "SENSOR_VALUE",
                "deviceId": "DHT22-001",
                "field": "temperature",
                "operator": "GREATER_THAN",
                "value": "32"
            }],
            "actions": [{
                "type": "TURN_ON_DEVICE",
                "deviceId": "FAN-001",
                "durationSeconds": "300"
            }]
        }))
    );
}

#[tokio::test]
async fn should_toggle_and_delete_rule() {
    let (backend, url) = spawn_backend().await;
    let client = client(&url, &signed_in());

    client.set_enabled(RuleId::new(12), true).await.unwrap();
    client.delete(RuleId::new(12)).await.unwrap();

    let seen = backend.seen();
    assert_eq!(seen[0].request, "PATCH /rules/12/toggle");
    assert_eq!(seen[0].body, Some(json!({"enabled": true})));
    assert_eq!(seen[1].request, "DELETE /rules/12");
}

#[tokio::test]
async fn should_list_rules_of_farm() {
    let (backend, url) = spawn_backend().await;
    let client = client(&url, &signed_in());

    let rules = client.list_by_farm(FarmId::new(7)).await.unwrap();

    assert_eq!(rules.len(), 1);
    assert_eq!(backend.requests(), ["GET /rules?farmId=7"]);
}

#[tokio::test]
async fn should_surface_backend_error_message() {
    let (_backend, url) = spawn_backend().await;
    let client = client(&url, &signed_in());

    let err = client.get_by_id(RuleId::new(500)).await.unwrap_err();

    let FarmhubError::Remote(remote) = err else {
        panic!("expected remote error");
    };
    assert_eq!(remote.status, Some(500));
    assert_eq!(remote.backend_message(), Some("database unavailable"));
}

#[tokio::test]
async fn should_report_undecodable_body() {
    let (_backend, url) = spawn_backend().await;
    let client = client(&url, &signed_in());

    let err = client.get_by_id(RuleId::new(13)).await.unwrap_err();

    let FarmhubError::Remote(remote) = err else {
        panic!("expected remote error");
    };
    assert_eq!(remote.status, None);
    assert!(remote.source.is_some());
}

#[tokio::test]
async fn should_refuse_to_call_without_token() {
    let (backend, url) = spawn_backend().await;
    let client = client(&url, &SessionContext::new().with_farm(FarmId::new(7)));

    let err = client.list_farms().await.unwrap_err();

    let FarmhubError::Remote(remote) = err else {
        panic!("expected remote error");
    };
    assert_eq!(remote.status, Some(401));
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn should_report_unreachable_backend_as_transport_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = client(&format!("http://{addr}/api"), &signed_in());

    let err = client.list_farms().await.unwrap_err();

    let FarmhubError::Remote(remote) = err else {
        panic!("expected remote error");
    };
    assert_eq!(remote.status, None);
    assert!(remote.backend_message().is_none());
}

#[tokio::test]
async fn should_edit_rule_end_to_end() {
    let (backend, url) = spawn_backend().await;
    let session = signed_in();
    let client = client(&url, &session);
    let mut editor = RuleEditor::new(
        client.clone(),
        client.clone(),
        client,
        session,
        EditorMode::Edit(RuleId::new(12)),
    );

    editor.open().await;
    assert_eq!(editor.state(), &EditorState::Ready);
    assert_eq!(editor.catalog().sensors().len(), 1);
    assert_eq!(editor.catalog().actuators().len(), 1);

    let outcome = editor.submit().await;

    let SubmitOutcome::Saved(saved) = outcome else {
        panic!("expected saved rule, got {outcome:?}");
    };
    assert!(!saved.enabled);
    let seen = backend.seen();
    let put = seen.iter().find(|s| s.request == "PUT /rules/12").unwrap();
    let body = put.body.as_ref().unwrap();
    assert_eq!(body["id"], json!(12));
    assert_eq!(body["enabled"], json!(false));
    assert_eq!(body["actions"][0]["durationSeconds"], json!(600));
    assert!(body.get("executionCount").is_none());
}
