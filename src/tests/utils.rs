// src/tests/utils.rs
use crate::client::SurveyApi;
use crate::config::Config;
use crate::domain::Survey;
use crate::errors::ClientError;
use astra::{Body, Request, Response, ResponseBuilder, Server};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::io::Read;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

/// A draft that passes every validation rule.
pub fn sample_survey() -> Survey {
    Survey {
        id: None,
        first_name: "Grace".into(),
        last_name: "Hopper".into(),
        street_address: "4400 University Dr".into(),
        city: "Fairfax".into(),
        state: "VA".into(),
        zip: "22030".into(),
        telephone: "7039931000".into(),
        email: "grace@example.edu".into(),
        date_of_survey: "2024-09-15".into(),
        liked_students: true,
        liked_location: false,
        liked_campus: true,
        liked_atmosphere: false,
        liked_dorm_rooms: false,
        liked_sports: false,
        interest_source: "friends".into(),
        recommendation_likelihood: "Very Likely".into(),
        additional_comments: "Great tour".into(),
    }
}

pub fn test_config() -> Config {
    Config::new("http://localhost:8080").unwrap()
}

// In-memory backend for controller tests

#[derive(Default)]
pub struct Records {
    pub surveys: BTreeMap<i64, Survey>,
    pub next_id: i64,
}

/// `SurveyApi` over a map, with failure injection and an optional gate that
/// holds every request until released.
#[derive(Default)]
pub struct FakeSurveys {
    records: Mutex<Records>,
    failure: Mutex<Option<u16>>,
    gate: Mutex<Option<Arc<Notify>>>,
    requests: AtomicUsize,
}

impl FakeSurveys {
    pub fn with(surveys: Vec<Survey>) -> Arc<Self> {
        let fake = FakeSurveys::default();
        {
            let mut records = fake.records.lock();
            for survey in surveys {
                records.next_id += 1;
                let id = survey.id.unwrap_or(records.next_id);
                records.next_id = records.next_id.max(id);
                records.surveys.insert(
                    id,
                    Survey {
                        id: Some(id),
                        ..survey
                    },
                );
            }
        }
        Arc::new(fake)
    }

    pub fn empty() -> Arc<Self> {
        Self::with(Vec::new())
    }

    /// Every following request fails with `status` until cleared.
    pub fn fail_with(&self, status: Option<u16>) {
        *self.failure.lock() = status;
    }

    /// Park requests until the returned handle is notified.
    pub fn hold(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.gate.lock() = Some(Arc::clone(&gate));
        gate
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn stored(&self, id: i64) -> Option<Survey> {
        self.records.lock().surveys.get(&id).cloned()
    }

    pub fn count(&self) -> usize {
        self.records.lock().surveys.len()
    }

    async fn enter(&self) -> Result<(), ClientError> {
        self.requests.fetch_add(1, Ordering::SeqCst);

        let gate = self.gate.lock().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        match *self.failure.lock() {
            Some(status) => Err(ClientError::Status {
                status,
                message: "injected failure".into(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SurveyApi for FakeSurveys {
    async fn create(&self, survey: &Survey) -> Result<Survey, ClientError> {
        self.enter().await?;
        let mut records = self.records.lock();
        records.next_id += 1;
        let id = records.next_id;
        let saved = Survey {
            id: Some(id),
            ..survey.clone()
        };
        records.surveys.insert(id, saved.clone());
        Ok(saved)
    }

    async fn list_all(&self) -> Result<Vec<Survey>, ClientError> {
        self.enter().await?;
        Ok(self.records.lock().surveys.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Survey, ClientError> {
        self.enter().await?;
        self.stored(id).ok_or(ClientError::NotFound(id))
    }

    async fn update(&self, id: i64, survey: &Survey) -> Result<Survey, ClientError> {
        self.enter().await?;
        let mut records = self.records.lock();
        let slot = records
            .surveys
            .get_mut(&id)
            .ok_or(ClientError::NotFound(id))?;
        *slot = Survey {
            id: Some(id),
            ..survey.clone()
        };
        Ok(slot.clone())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), ClientError> {
        self.enter().await?;
        self.records
            .lock()
            .surveys
            .remove(&id)
            .map(|_| ())
            .ok_or(ClientError::NotFound(id))
    }

    async fn delete_all(&self) -> Result<(), ClientError> {
        self.enter().await?;
        self.records.lock().surveys.clear();
        Ok(())
    }
}

// HTTP stub backend for client tests

#[derive(Default)]
pub struct StubState {
    pub records: Records,
    /// Answer every request with this status.
    pub fail_with: Option<u16>,
    /// Body of the latest POST/PUT as received.
    pub last_body: Option<serde_json::Value>,
}

pub struct StubBackend {
    pub base_url: String,
    pub state: Arc<Mutex<StubState>>,
}

/// Start a `/api/surveys` backend on a free local port.
pub fn spawn_backend() -> StubBackend {
    let addr = free_addr();
    let state = Arc::new(Mutex::new(StubState::default()));

    let shared = Arc::clone(&state);
    std::thread::spawn(move || {
        let server = Server::bind(&addr).max_workers(4);
        let _ = server.serve(move |req, _info| handle(req, &shared));
    });

    wait_until_listening(addr);

    StubBackend {
        base_url: format!("http://{addr}"),
        state,
    }
}

/// An address nothing is listening on.
pub fn free_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

fn wait_until_listening(addr: SocketAddr) {
    for _ in 0..200 {
        if TcpStream::connect(addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    panic!("stub backend did not start on {addr}");
}

fn handle(mut req: Request, state: &Mutex<StubState>) -> Response {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    let mut raw = String::new();
    req.body_mut().reader().read_to_string(&mut raw).unwrap();

    let mut state = state.lock();
    if let Some(status) = state.fail_with {
        return text(status, "stub failure");
    }

    match (method.as_str(), segments.as_slice()) {
        ("GET", ["api", "surveys"]) => {
            let all: Vec<&Survey> = state.records.surveys.values().collect();
            json(200, &all)
        }
        ("POST", ["api", "surveys"]) => {
            let Some(survey) = parse_body(&raw, &mut state) else {
                return text(400, "malformed survey");
            };
            state.records.next_id += 1;
            let id = state.records.next_id;
            let saved = Survey {
                id: Some(id),
                ..survey
            };
            state.records.surveys.insert(id, saved.clone());
            json(201, &saved)
        }
        ("DELETE", ["api", "surveys"]) => {
            state.records.surveys.clear();
            empty(204)
        }
        (method, ["api", "surveys", id]) => {
            let Ok(id) = id.parse::<i64>() else {
                return text(400, "bad id");
            };
            match method {
                "GET" => match state.records.surveys.get(&id) {
                    Some(survey) => json(200, survey),
                    None => empty(404),
                },
                "PUT" => {
                    let Some(survey) = parse_body(&raw, &mut state) else {
                        return text(400, "malformed survey");
                    };
                    match state.records.surveys.get_mut(&id) {
                        Some(slot) => {
                            *slot = Survey {
                                id: Some(id),
                                ..survey
                            };
                            json(200, &*slot)
                        }
                        None => empty(404),
                    }
                }
                "DELETE" => match state.records.surveys.remove(&id) {
                    Some(_) => empty(204),
                    None => empty(404),
                },
                _ => text(405, "method not allowed"),
            }
        }
        _ => text(404, "no such route"),
    }
}

fn parse_body(raw: &str, state: &mut StubState) -> Option<Survey> {
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    state.last_body = Some(value.clone());
    serde_json::from_value(value).ok()
}

fn json<T: serde::Serialize + ?Sized>(status: u16, value: &T) -> Response {
    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(value).unwrap()))
        .unwrap()
}

fn text(status: u16, message: &str) -> Response {
    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "text/plain")
        .body(Body::from(message.to_string()))
        .unwrap()
}

fn empty(status: u16) -> Response {
    ResponseBuilder::new()
        .status(status)
        .body(Body::empty())
        .unwrap()
}
