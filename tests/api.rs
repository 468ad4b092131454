use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use countdown_notice::{
    api::create_router,
    countdown::{Clock, ManualClock, RunOutcome},
    dom::{DomContract, MemoryDom},
    settings::{BannerConfig, BannerMarkup, PageConfig},
    state::AppState,
    tasks::countdown_task,
};
use serde_json::{json, Value};
use tower::ServiceExt;

const NOW: i64 = 1_750_000_000;

fn page(target: i64) -> PageConfig {
    PageConfig {
        banner: BannerMarkup {
            text: "Early bird tickets".into(),
            countdown_active: true,
            bg_color: Some("#0a0a0a".into()),
            ..Default::default()
        },
        data: BannerConfig {
            countdown_target: Some(target),
            server_time: Some(NOW),
            ..Default::default()
        },
    }
}

fn mount(page: &PageConfig) -> Arc<AppState> {
    Arc::new(AppState::mount(
        page,
        DomContract::default(),
        "127.0.0.1".into(),
        20554,
    ))
}

async fn request(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = request(app, "GET", uri, None).await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

#[tokio::test]
async fn health_reports_ok() {
    let state = mount(&page(NOW + 60));
    let (status, body) = get_json(create_router(state), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn config_echoes_snapshot() {
    let state = mount(&page(NOW + 60));
    let (status, body) = get_json(create_router(state), "/config").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["countdownTarget"], NOW + 60);
    assert_eq!(body["finishAction"], "hide");
    assert_eq!(body["alternativeLinkText"], "Learn more");
}

#[tokio::test]
async fn status_before_countdown_starts() {
    let state = mount(&page(NOW + 60));
    let (status, body) = get_json(create_router(state), "/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mounted"], true);
    assert_eq!(body["countdown_configured"], false);
    assert_eq!(body["ended"], false);
    assert_eq!(body["port"], 20554);
}

#[tokio::test]
async fn banner_is_served_as_html() {
    let state = mount(&page(NOW + 60));
    let (status, body) = request(create_router(state), "GET", "/banner", None).await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.starts_with(r#"<div id="countdown-notice""#), "{html}");
    assert!(html.contains("Early bird tickets"));
    assert!(html.contains("background-color: #0a0a0a;"));
}

#[tokio::test]
async fn page_without_banner_is_inert() {
    let state = Arc::new(AppState::with_document(
        Arc::new(page(NOW + 60).data),
        MemoryDom::new(),
        DomContract::default(),
        "127.0.0.1".into(),
        20554,
    ));

    let clock: Arc<dyn Clock> = Arc::new(ManualClock::new(NOW));
    assert_eq!(countdown_task(Arc::clone(&state), clock).await, None);

    let app = create_router(state);
    let (status, _) = request(app.clone(), "GET", "/banner", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = get_json(app, "/status").await;
    assert_eq!(body["mounted"], false);
    assert_eq!(body["countdown_configured"], false);
}

#[tokio::test(start_paused = true)]
async fn expired_countdown_hides_banner() {
    let state = mount(&page(NOW - 5));
    let clock: Arc<dyn Clock> = Arc::new(ManualClock::new(NOW));
    let mut updates = state.subscribe();

    let outcome = countdown_task(Arc::clone(&state), clock).await;
    assert_eq!(outcome, Some(RunOutcome::ExpiredAtStart));
    assert!(updates.has_changed().unwrap());
    assert!(updates.borrow_and_update().ended);

    let app = create_router(state);
    let (_, body) = get_json(app.clone(), "/status").await;
    assert_eq!(body["countdown_configured"], true);
    assert_eq!(body["ended"], true);
    assert_eq!(body["running"], false);
    assert_eq!(body["display"], "0d 00h 00m");
    assert_eq!(body["transition"]["outcome"], "hidden");
    assert_eq!(body["transition"]["original_styles"]["background_color"], "#0a0a0a");

    let (_, html) = request(app, "GET", "/banner", None).await;
    let html = String::from_utf8(html).unwrap();
    assert!(html.contains("display: none;"), "{html}");
    assert!(html.contains("Early bird tickets"));
}

#[tokio::test]
async fn admin_preview_applies_visibility_rules() {
    let state = mount(&page(NOW + 60));
    let form = json!({
        "finish_action": "show_alternative",
        "countdown_active": true,
        "countdown_target_mode": "custom",
        "alternative_colors_mode": "custom",
        "bg_color": "#101010",
        "alternative_text_color": "#fefefe"
    });

    let (status, body) = request(create_router(state), "POST", "/admin/preview", Some(form)).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body["visibility"]["alternative_fields"], true);
    assert_eq!(body["visibility"]["alternative_color_fields"], true);
    assert_eq!(body["visibility"]["custom_target_field"], true);
    assert_eq!(body["colors"]["main"]["background"], "#101010");
    assert_eq!(body["colors"]["alternative"]["background"], "#101010");
    assert_eq!(body["colors"]["alternative"]["color"], "#fefefe");
    assert_eq!(body["colors"]["alternative"]["border"], "1px solid #fefefe40");
}
