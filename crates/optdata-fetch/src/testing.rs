//! In-process HTTP server for exercising the client against canned responses.

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use crate::{ApiClient, ClientConfig};

type Reply = (StatusCode, [(header::HeaderName, &'static str); 1], String);

/// Builder for a mock server keyed by request target (`/path?query`).
#[derive(Debug, Default)]
pub(crate) struct MockServerBuilder {
    routes: HashMap<String, (u16, String)>,
}

/// Routes and hit log shared with the handler.
#[derive(Debug, Default)]
struct Shared {
    routes: HashMap<String, (u16, String)>,
    hits: Mutex<Vec<String>>,
}

impl MockServerBuilder {
    pub(crate) fn route(mut self, target: &str, status: u16, body: Value) -> Self {
        self.routes
            .insert(target.to_string(), (status, body.to_string()));
        self
    }

    pub(crate) async fn spawn(self) -> MockServer {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/", listener.local_addr().unwrap());
        let shared = Arc::new(Shared {
            routes: self.routes,
            hits: Mutex::default(),
        });

        let app = Router::new()
            .fallback(respond)
            .with_state(Arc::clone(&shared));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockServer { base_url, shared }
    }
}

/// Answers any request from the route map; unknown targets get a 404 envelope.
async fn respond(State(shared): State<Arc<Shared>>, uri: Uri) -> Reply {
    let target = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), |pq| pq.as_str().to_string());
    shared.hits.lock().unwrap().push(target.clone());

    let (status, body) = shared.routes.get(&target).cloned().unwrap_or_else(|| {
        (
            404,
            r#"{"error":{"code":404,"message":"not_found"}}"#.to_string(),
        )
    });
    (
        StatusCode::from_u16(status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
}

/// A running mock server.
#[derive(Debug)]
pub(crate) struct MockServer {
    base_url: String,
    shared: Arc<Shared>,
}

impl MockServer {
    pub(crate) fn start() -> MockServerBuilder {
        MockServerBuilder::default()
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    /// A client pointed at this server.
    pub(crate) fn client(&self) -> ApiClient {
        ApiClient::new(ClientConfig {
            base_url: self.base_url.clone(),
            no_proxy: true,
            ..Default::default()
        })
        .unwrap()
    }

    /// Request targets received so far.
    pub(crate) fn hits(&self) -> Vec<String> {
        self.shared.hits.lock().unwrap().clone()
    }

    /// A base URL with nothing listening behind it.
    pub(crate) async fn unreachable_base_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}/")
    }
}
