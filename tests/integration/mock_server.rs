//! Mock HTTP server setup for integration tests

use mockito::{Mock, Server, ServerGuard};
use robo_sdk::{Config, RoboAi, RoboNlu};
use std::sync::{Arc, Mutex};

/// base64("client:secret")
pub const BASIC_AUTH: &str = "Basic Y2xpZW50OnNlY3JldA==";

/// Test fixture that manages a mock server
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub fn new() -> Self {
        let server = Server::new();
        let base_url = server.url();
        Self { server, base_url }
    }

    pub fn config(&self) -> Config {
        Config::new(&self.base_url, "client", "secret").expect("valid mock config")
    }

    pub fn robo_ai(&self) -> RoboAi {
        RoboAi::new(self.config()).expect("client")
    }

    pub fn nlu(&self) -> RoboNlu {
        RoboNlu::new(self.config()).expect("client")
    }

    /// Create a mock answering `method path` with a JSON body
    pub fn mock_json(&mut self, method: &str, path: &str, status: usize, body: &str) -> Mock {
        self.server
            .mock(method, path)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create()
    }
}

/// Progress sink that records every reported value.
pub fn progress_recorder() -> (Arc<Mutex<Vec<u64>>>, robo_sdk::ProgressCallback) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    (seen, Box::new(move |n| sink.lock().unwrap().push(n)))
}
