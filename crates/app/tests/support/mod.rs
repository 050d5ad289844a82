//! Shared wiring for command tests: a mocked backend and an `AppContext`
//! built against it.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use t3tracker_core::ElapsedDisplay;
use t3tracker_domain::{ApiConfig, Config, TrackingConfig};
use t3tracker_infra::MemoryCredentialStore;
use t3tracker_lib::AppContext;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "tok-1";

/// Fast cadence so tracking tests finish in well under a second.
pub const FAST_TRACKING: TrackingConfig = TrackingConfig { tick_interval_ms: 10, flush_every_ticks: 3 };

/// Forwards displayed values to the test.
pub struct ChannelDisplay(UnboundedSender<u64>);

impl ElapsedDisplay for ChannelDisplay {
    fn show_elapsed(&self, elapsed_seconds: u64) {
        let _ = self.0.send(elapsed_seconds);
    }
}

pub struct TestApp {
    pub ctx: AppContext,
    pub store: Arc<MemoryCredentialStore>,
    pub display: UnboundedReceiver<u64>,
}

pub fn app(server: &MockServer, token: Option<&str>, tracking: TrackingConfig) -> TestApp {
    let config = Config {
        api: ApiConfig { base_url: server.uri(), timeout_seconds: 5, user_agent: None },
        tracking,
        ..Config::default()
    };
    let store = Arc::new(MemoryCredentialStore::new(token.map(str::to_string)));
    let (tx, display) = mpsc::unbounded_channel();

    let ctx = AppContext::with_ports(config, store.clone(), Arc::new(ChannelDisplay(tx)))
        .expect("context wires up");
    TestApp { ctx, store, display }
}

/// Wait (bounded) until the display shows `target`.
pub async fn wait_for_display(display: &mut UnboundedReceiver<u64>, target: u64) {
    tokio::time::timeout(Duration::from_secs(10), async {
        while let Some(shown) = display.recv().await {
            if shown == target {
                return;
            }
        }
        panic!("display closed before reaching {target}");
    })
    .await
    .expect("display reached target in time");
}

/// Mount the read endpoints of a backend with one user, one project and
/// three tasks (two assigned to the user).
pub async fn mock_backend() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": TOKEN})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1",
            "name": "Alice",
            "email": "alice@example.com",
            "projects": ["p1"]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/project/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "p1", "name": "Apollo"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/task"))
        .and(query_param("projectId", "p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "t1", "name": "Design", "employees": ["u1"]},
            {"id": "t2", "name": "Build", "employees": ["u1", "u2"]},
            {"id": "t3", "name": "Review", "employees": ["u2"]}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/task/t1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "t1", "name": "Design (detailed)"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/analytics/task-time"))
        .and(query_param("taskId", "t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"totalTimeMillis": 5_400_000})))
        .mount(&server)
        .await;

    server
}

pub async fn accept_time_entries(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/time-entries"))
        .respond_with(ResponseTemplate::new(201))
        .mount(server)
        .await;
}
