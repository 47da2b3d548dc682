//! `HttpGateway` against a stub proposal service on a local port.

mod common;

use std::time::Duration;

use actix_web::{HttpResponse, web};
use serde_json::{Value, json};

use common::spawn_remote;
use suggestion_portal::gateway::{GatewayError, HttpGateway, ProposalGateway};
use suggestion_portal::models::suggestion::{NewProposalPayload, NewProposalScores};

const PROJECT_PATH: &str = "/rest/myservice/v1/project";

fn healthy_remote(cfg: &mut web::ServiceConfig) {
    cfg.route(
        PROJECT_PATH,
        web::get().to(|| async {
            HttpResponse::Ok().json(json!([
                {
                    "WorkName": "Tunnel Reinforcement",
                    "EstimatedCost": 42000,
                    "ProjectScores": {
                        "ProjectedCost": 39000, "Safety": 87, "Compliance": 93,
                        "Environmental": 76, "Efficiency": 84, "Innovation": 90
                    }
                },
                { "WorkName": "Half Filled" }
            ]))
        }),
    )
    .route(
        PROJECT_PATH,
        web::post().to(|body: web::Json<Vec<Value>>| async move {
            let ok = body.len() == 1
                && body[0]["WorkName"] == "Culvert"
                && body[0]["ProjectScores"]["Safety"] == 0.0;
            if ok {
                HttpResponse::Created().finish()
            } else {
                HttpResponse::BadRequest().finish()
            }
        }),
    )
    .route(
        "/api/suggestions/{id}/approve",
        web::post().to(|path: web::Path<i64>| async move {
            if path.into_inner() == 7 {
                HttpResponse::Ok().body("ignored")
            } else {
                HttpResponse::NotFound().finish()
            }
        }),
    )
    .route(
        "/api/suggestions/{id}/reject",
        web::post().to(|| async { HttpResponse::InternalServerError().finish() }),
    );
}

fn broken_remote(cfg: &mut web::ServiceConfig) {
    cfg.route(
        PROJECT_PATH,
        web::get().to(|| async {
            HttpResponse::Ok()
                .content_type("text/html")
                .body("<html>maintenance</html>")
        }),
    );
}

fn slow_remote(cfg: &mut web::ServiceConfig) {
    cfg.route(
        PROJECT_PATH,
        web::get().to(|| async {
            actix_rt::time::sleep(Duration::from_secs(2)).await;
            HttpResponse::Ok().json(json!([]))
        }),
    );
}

fn gateway_for(base: &str, timeout: Duration) -> HttpGateway {
    HttpGateway::with_timeout(&format!("{base}{PROJECT_PATH}"), base, timeout)
        .expect("build gateway")
}

#[actix_rt::test]
async fn test_fetch_all_decodes_full_and_partial_records() {
    let base = spawn_remote(healthy_remote);
    let gateway = gateway_for(&base, Duration::from_secs(5));

    let items = gateway.fetch_all().await.expect("fetch");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].work_name.as_deref(), Some("Tunnel Reinforcement"));
    assert_eq!(items[0].estimated_cost, Some(42000.0));
    assert_eq!(
        items[0].project_scores.as_ref().and_then(|s| s.safety),
        Some(87.0)
    );
    assert!(items[1].project_scores.is_none());
}

#[actix_rt::test]
async fn test_submit_new_posts_single_element_array() {
    let base = spawn_remote(healthy_remote);
    let gateway = gateway_for(&base, Duration::from_secs(5));

    let payload = NewProposalPayload {
        work_name: "Culvert".to_string(),
        estimated_cost: 900.0,
        project_scores: NewProposalScores::default(),
    };
    gateway.submit_new(&payload).await.expect("submit");
}

#[actix_rt::test]
async fn test_decision_posts_hit_expected_paths() {
    let base = spawn_remote(healthy_remote);
    let gateway = gateway_for(&base, Duration::from_secs(5));

    gateway.approve(7).await.expect("approve");
    assert!(matches!(gateway.approve(8).await, Err(GatewayError::Status(404))));
    assert!(matches!(gateway.reject(7).await, Err(GatewayError::Status(500))));
}

#[actix_rt::test]
async fn test_non_json_body_is_a_decode_error() {
    let base = spawn_remote(broken_remote);
    let gateway = gateway_for(&base, Duration::from_secs(5));

    assert!(matches!(gateway.fetch_all().await, Err(GatewayError::Decode(_))));
}

#[actix_rt::test]
async fn test_slow_service_times_out() {
    let base = spawn_remote(slow_remote);
    let gateway = gateway_for(&base, Duration::from_millis(200));

    assert!(matches!(gateway.fetch_all().await, Err(GatewayError::Timeout)));
}

#[actix_rt::test]
async fn test_unreachable_service_is_a_transport_error() {
    // Port 9 (discard) is not served by anything in the test environment.
    let gateway = gateway_for("http://127.0.0.1:9", Duration::from_secs(2));

    let result = gateway.fetch_all().await;
    assert!(matches!(
        result,
        Err(GatewayError::Transport(_)) | Err(GatewayError::Timeout)
    ));
}
