//! Shared test harness: an in-process stub CMS plus the application
//! itself, both on ephemeral ports

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use renderlab::config::{CmsConfig, RenderConfig, ServerConfig};
use renderlab::Config;
use renderlab_server::AppState;
use serde_json::{json, Value};

/// Stub CMS whose items can be edited while the app is running
#[derive(Clone)]
pub struct StubCms {
    items: Arc<Mutex<Vec<Value>>>,
}

impl StubCms {
    pub fn new(items: Vec<Value>) -> Self {
        Self {
            items: Arc::new(Mutex::new(items)),
        }
    }

    fn router(&self) -> Router {
        Router::new()
            .route("/items/posts", get(items_handler))
            .with_state(self.clone())
    }

    /// Change an item's title, simulating a CMS edit
    pub fn set_title(&self, slug: &str, title: &str) {
        let mut items = self.items.lock().unwrap();
        for item in items.iter_mut() {
            if item["slug"].as_str() == Some(slug) {
                item["title"] = json!(title);
            }
        }
    }
}

async fn items_handler(
    State(stub): State<StubCms>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let items = stub.items.lock().unwrap().clone();

    let data: Vec<Value> = match params.get("filter[slug][_eq]") {
        Some(slug) => items
            .into_iter()
            .filter(|item| item["slug"].as_str() == Some(slug))
            .collect(),
        None => items,
    };

    Json(json!({ "data": data }))
}

pub fn hello_world() -> Value {
    json!({
        "slug": "hello-world",
        "title": "Hello World",
        "body": "<p>First post</p>",
        "date_updated": "2025-05-04T12:00:00Z"
    })
}

pub fn second_post() -> Value {
    json!({
        "slug": "rendering-strategies",
        "title": "Rendering Strategies",
        "body": "<p>Second post</p>",
        "date_updated": null
    })
}

/// The app under test plus handles on its surroundings
pub struct TestApp {
    pub base: String,
    pub cms: StubCms,
    pub state: AppState,
    pub client: reqwest::Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client.get(self.url(path)).send().await.unwrap()
    }

    pub async fn post_json(&self, path: &str, body: Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap()
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(vec![hello_world(), second_post()], None).await
}

/// Spin up a stub CMS and the app over it. The ISR window is shortened
/// to 200ms so staleness is testable without long sleeps.
pub async fn spawn_app_with(items: Vec<Value>, secret: Option<&str>) -> TestApp {
    let cms = StubCms::new(items);
    let cms_base = serve(cms.router()).await;

    // Bind the app listener first so the public origin is known before
    // the state (and its probe) is constructed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base = format!("http://{}", addr);

    let config = Config {
        cms: CmsConfig {
            base_url: cms_base,
            collection: "posts".to_string(),
            token: None,
        },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: addr.port(),
            public_origin: base.clone(),
            revalidate_secret: secret.map(str::to_string),
        },
        render: RenderConfig {
            isr_revalidate: Duration::from_millis(200),
            cache_backend: "memory".to_string(),
            cache_dir: ".renderlab/test-cache".to_string(),
        },
    };

    let state = AppState::new(config).await.unwrap();
    let app = renderlab_server::app(state.clone());
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

    TestApp {
        base,
        cms,
        state,
        client: reqwest::Client::new(),
    }
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{}", addr)
}

/// The `x-render-cache` header of a response
pub fn cache_header(response: &reqwest::Response) -> String {
    response
        .headers()
        .get("x-render-cache")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
