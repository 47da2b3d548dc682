//! Shared test infrastructure.
//!
//! - fixtures for remote and display records
//! - `FakeGateway`, a scripted stand-in for the proposal service
//! - `test_state()` and `init_app!` for handler tests
//! - `spawn_remote()` for exercising `HttpGateway` against a real socket

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use actix_web::{App, HttpServer, web};
use async_trait::async_trait;

use suggestion_portal::config::AppConfig;
use suggestion_portal::gateway::{GatewayError, ProposalGateway};
use suggestion_portal::models::suggestion::{
    ApiProjectScores, ApiProjectSuggestion, NewProposalPayload, ScoreGroup, Suggestion,
};
use suggestion_portal::state::PortalState;

// ============================================================================
// FIXTURES
// ============================================================================

pub fn remote_record(name: &str, cost: f64) -> ApiProjectSuggestion {
    ApiProjectSuggestion {
        id: None,
        work_name: Some(name.to_string()),
        estimated_cost: Some(cost),
        project_scores: Some(ApiProjectScores {
            projected_cost: Some(cost * 0.9),
            safety: Some(80.0),
            compliance: Some(70.0),
            environmental: Some(60.0),
            efficiency: Some(50.0),
            innovation: Some(40.0),
        }),
    }
}

/// The reference record used throughout the export tests.
pub fn tunnel_reinforcement() -> Suggestion {
    Suggestion {
        id: 1,
        work_name: "Tunnel Reinforcement".to_string(),
        estimated_cost: "$42,000".to_string(),
        scores: ScoreGroup {
            projected_cost: "$39,000".to_string(),
            safety: 87,
            compliance: 93,
            environmental: 76,
            efficiency: 84,
            innovation: 90,
        },
        images: vec!["/img1.jpg".to_string()],
        files: vec![],
    }
}

// ============================================================================
// FAKE GATEWAY
// ============================================================================

/// Scripted proposal service. `fail` makes every call error out; every call
/// is recorded in `calls`.
#[derive(Default)]
pub struct FakeGateway {
    pub records: Mutex<Vec<ApiProjectSuggestion>>,
    pub fail: AtomicBool,
    pub calls: Mutex<Vec<String>>,
    pub submitted: Mutex<Vec<NewProposalPayload>>,
}

impl FakeGateway {
    pub fn with_records(records: Vec<ApiProjectSuggestion>) -> Arc<Self> {
        Arc::new(Self {
            records: Mutex::new(records),
            ..Default::default()
        })
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), GatewayError> {
        self.calls.lock().unwrap().push(call);
        if self.fail.load(Ordering::SeqCst) {
            Err(GatewayError::Status(503))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ProposalGateway for FakeGateway {
    async fn fetch_all(&self) -> Result<Vec<ApiProjectSuggestion>, GatewayError> {
        self.record("fetch".to_string())?;
        Ok(self.records.lock().unwrap().clone())
    }

    async fn submit_new(&self, payload: &NewProposalPayload) -> Result<(), GatewayError> {
        self.submitted.lock().unwrap().push(payload.clone());
        self.record(format!("submit {}", payload.work_name))
    }

    async fn approve(&self, id: i64) -> Result<(), GatewayError> {
        self.record(format!("approve {id}"))
    }

    async fn reject(&self, id: i64) -> Result<(), GatewayError> {
        self.record(format!("reject {id}"))
    }
}

// ============================================================================
// APP SETUP
// ============================================================================

pub fn test_config() -> AppConfig {
    AppConfig::from_lookup(|_| None)
}

pub fn test_state(gateway: Arc<FakeGateway>) -> web::Data<PortalState> {
    web::Data::new(PortalState::new(test_config(), gateway))
}

/// Build the full application around `$state` with a fresh session key.
#[allow(unused_macros)]
macro_rules! init_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(suggestion_portal::session::middleware(
                    actix_web::cookie::Key::generate(),
                ))
                .app_data($state.clone())
                .configure(suggestion_portal::handlers::configure),
        )
        .await
    };
}

/// Pull the CSRF token out of a rendered page.
pub fn csrf_token_from(html: &str) -> String {
    let re = regex::Regex::new(r#"name="csrf_token" value="([0-9a-f]{64})""#).unwrap();
    re.captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .expect("page should carry a CSRF token")
}

// ============================================================================
// STUB REMOTE SERVICE
// ============================================================================

/// Serve `configure` on an ephemeral port and return its base URL.
/// Must be called from inside an actix runtime.
pub fn spawn_remote(configure: fn(&mut web::ServiceConfig)) -> String {
    let server = HttpServer::new(move || App::new().configure(configure))
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .expect("bind stub remote");
    let addr = server.addrs()[0];
    actix_rt::spawn(server.run());
    format!("http://{addr}")
}
