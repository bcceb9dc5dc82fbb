use reqwest::{redirect::Policy, Client, StatusCode};
use std::sync::Arc;
use tokio::net::TcpListener;

use todo_list_rust::config::AppConfig;
use todo_list_rust::session::SessionMode;
use todo_list_rust::store::{MemoryStore, UserStore};
use todo_list_rust::{build_app, NewUser};

// Test client wrapper for making form posts against a running server
struct TestClient {
    client: Client,
    base_url: String,
}

impl TestClient {
    fn new(base_url: &str) -> Self {
        Self {
            client: Client::builder()
                .cookie_store(true)
                .redirect(Policy::none())
                .build()
                .unwrap(),
            base_url: base_url.to_string(),
        }
    }

    async fn get(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
    }

    async fn post(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Result<reqwest::Response> {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .form(form)
            .send()
            .await
    }

    async fn page(&self) -> String {
        let response = self.get("/").await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        response.text().await.unwrap()
    }
}

/// Serve the app on an ephemeral port and return its base URL
async fn spawn_server(mode: SessionMode, users: &[(&str, &str)]) -> String {
    let store = Arc::new(MemoryStore::new());
    for (name, color) in users {
        store
            .create_user(NewUser::new(name.to_string(), Some(color.to_string())))
            .await
            .unwrap();
    }

    let mut config = AppConfig::default();
    config.session.mode = mode;
    config.server.static_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/public").to_string();

    let app = build_app(store, &config);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", address)
}

#[tokio::test]
async fn test_family_list_workflow() {
    let base_url = spawn_server(SessionMode::PerClient, &[("Angela", "teal")]).await;
    let client = TestClient::new(&base_url);

    assert!(client.page().await.contains("Angela&#39;s List"));

    let response = client.post("/add", &[("newItem", "Buy milk")]).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    client.post("/add", &[("newItem", "Walk dog")]).await.unwrap();

    let page = client.page().await;
    let milk = page.find("Buy milk").unwrap();
    let dog = page.find("Walk dog").unwrap();
    assert!(milk < dog);

    // New profile becomes active and starts with an empty list
    let response = client
        .post("/new", &[("name", "Jack"), ("color", "powderblue")])
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let page = client.page().await;
    assert!(page.contains("Jack&#39;s List"));
    assert!(page.contains("--accent: powderblue"));
    assert!(!page.contains("Buy milk"));

    client.post("/user", &[("user", "1")]).await.unwrap();
    let page = client.page().await;
    assert!(page.contains("Angela&#39;s List"));
    assert!(page.contains("Buy milk"));
}

#[tokio::test]
async fn test_per_client_sessions_do_not_interfere() {
    let base_url =
        spawn_server(SessionMode::PerClient, &[("Angela", "teal"), ("Jack", "tomato")]).await;
    let first = TestClient::new(&base_url);
    let second = TestClient::new(&base_url);

    assert!(first.page().await.contains("Angela&#39;s List"));
    assert!(second.page().await.contains("Angela&#39;s List"));

    second.post("/user", &[("user", "2")]).await.unwrap();

    assert!(first.page().await.contains("Angela&#39;s List"));
    assert!(second.page().await.contains("Jack&#39;s List"));
}

#[tokio::test]
async fn test_shared_mode_selection_leaks_across_clients() {
    let base_url =
        spawn_server(SessionMode::Shared, &[("Angela", "teal"), ("Jack", "tomato")]).await;
    let first = TestClient::new(&base_url);
    let second = TestClient::new(&base_url);

    assert!(first.page().await.contains("Angela&#39;s List"));

    // Another client's switch changes what the first client sees and edits
    second.post("/user", &[("user", "2")]).await.unwrap();
    assert!(first.page().await.contains("Jack&#39;s List"));

    first.post("/add", &[("newItem", "Meant for Angela")]).await.unwrap();
    second.post("/user", &[("user", "1")]).await.unwrap();
    assert!(!first.page().await.contains("Meant for Angela"));
}

#[tokio::test]
async fn test_static_assets_are_served() {
    let base_url = spawn_server(SessionMode::PerClient, &[]).await;
    let client = TestClient::new(&base_url);

    let response = client.get("/styles/main.css").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().contains("--accent"));

    let missing = client.get("/nope.css").await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}
