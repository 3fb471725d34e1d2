use std::{
    collections::VecDeque,
    net::TcpListener,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use anyhow::anyhow;
use async_trait::async_trait;
use rival::{
    services::{FetchFailure, FetchedPage, PageFetcher, Pipeline, PipelineSettings, TextGenerator},
    startup::run,
};
use url::Url;

pub const ALLOWED_ORIGIN: &str = "http://localhost:3000";

pub struct StaticFetcher {
    pub body: String,
    pub title: Option<String>,
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch(&self, _: &Url, _: Duration) -> Result<FetchedPage, FetchFailure> {
        Ok(FetchedPage {
            body: self.body.clone(),
            title: self.title.clone(),
        })
    }
}

#[derive(Default)]
pub struct QueuedGenerator {
    replies: Mutex<VecDeque<String>>,
    pub calls: AtomicUsize,
}

impl QueuedGenerator {
    pub fn replying(replies: &[&str]) -> Self {
        QueuedGenerator {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl TextGenerator for QueuedGenerator {
    async fn generate(&self, _: &str, _: f32, _: Duration) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow!("backend down"))
    }
}

pub struct TestApp {
    pub address: String,
    pub generator: Arc<QueuedGenerator>,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn post_analysis(&self, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/api/v1/quick-analysis", self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub fn generation_calls(&self) -> usize {
        self.generator.calls.load(Ordering::SeqCst)
    }
}

pub async fn spawn_app(fetcher: StaticFetcher, generator: QueuedGenerator) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let generator = Arc::new(generator);
    let pipeline = Pipeline::new(
        Arc::new(fetcher),
        generator.clone(),
        PipelineSettings::default(),
    );
    let server = run(listener, pipeline, vec![ALLOWED_ORIGIN.to_string()])
        .expect("Failed to bind address");
    tokio::spawn(server);

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        generator,
        client: reqwest::Client::new(),
    }
}

pub fn page(body: &str) -> StaticFetcher {
    StaticFetcher {
        body: body.to_string(),
        title: None,
    }
}
