//! Stand-ins for the fetch and generation backends, in memory or on a local port.

use std::{
    collections::VecDeque,
    net::TcpListener,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use actix_web::{http::StatusCode, web, App, HttpRequest, HttpResponse, HttpServer};
use anyhow::anyhow;
use async_trait::async_trait;
use url::Url;

use super::{FetchFailure, FetchedPage, PageFetcher, TextGenerator};

pub struct FakeFetcher {
    page: FetchedPage,
    fetches: Arc<AtomicUsize>,
}

impl FakeFetcher {
    pub fn with_body(body: &str) -> Self {
        FakeFetcher {
            page: FetchedPage {
                body: body.to_string(),
                title: None,
            },
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn titled(mut self, title: &str) -> Self {
        self.page.title = Some(title.to_string());
        self
    }

    pub fn counter(&self) -> Arc<AtomicUsize> {
        self.fetches.clone()
    }
}

#[async_trait]
impl PageFetcher for FakeFetcher {
    async fn fetch(&self, _: &Url, _: Duration) -> Result<FetchedPage, FetchFailure> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.page.clone())
    }
}

/// Replies with queued responses in order, then fails every later call.
#[derive(Default)]
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn replying(replies: &[&str]) -> Self {
        ScriptedGenerator {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            prompts: Mutex::new(vec![]),
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str, _: f32, _: Duration) -> anyhow::Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow!("generation backend unavailable"))
    }
}

/// What the stub server saw of one request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub query: String,
    pub api_key: Option<String>,
    pub user_agent: Option<String>,
}

struct StubState {
    status: StatusCode,
    body: String,
    delay: Duration,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// A local HTTP upstream answering every request with one canned response.
pub struct StubServer {
    address: String,
    state: web::Data<StubState>,
}

impl StubServer {
    pub fn spawn(status: StatusCode, body: &str) -> Self {
        Self::spawn_delayed(status, body, Duration::ZERO)
    }

    pub fn spawn_delayed(status: StatusCode, body: &str, delay: Duration) -> Self {
        let state = web::Data::new(StubState {
            status,
            body: body.to_string(),
            delay,
            requests: Mutex::new(vec![]),
        });
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();

        let app_state = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(app_state.clone())
                .default_service(web::to(respond))
        })
        .workers(1)
        .listen(listener)
        .expect("Failed to listen on stub port")
        .run();
        tokio::spawn(server);

        StubServer {
            address: format!("http://127.0.0.1:{}", port),
            state,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub fn hits(&self) -> usize {
        self.state.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

async fn respond(req: HttpRequest, state: web::Data<StubState>) -> HttpResponse {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    };
    state.requests.lock().unwrap().push(RecordedRequest {
        path: req.path().to_string(),
        query: req.query_string().to_string(),
        api_key: header("x-api-key"),
        user_agent: header("user-agent"),
    });

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    HttpResponse::build(state.status)
        .content_type("application/json")
        .body(state.body.clone())
}
