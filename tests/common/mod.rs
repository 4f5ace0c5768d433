//! Shared wiremock harness
//!
//! The mock server runs on a private tokio runtime while the blocking
//! client issues requests from the test thread.

use molcmd::api::MolgenisClient;
use molcmd::config::Config;
use serde_json::json;
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct TestServer {
    // declared before the runtime so expectations are verified on drop
    // while the runtime is still alive
    server: MockServer,
    rt: Runtime,
}

impl TestServer {
    pub fn start() -> Self {
        let rt = Runtime::new().expect("tokio runtime");
        let server = rt.block_on(MockServer::start());
        Self { server, rt }
    }

    pub fn mount(&self, mock: Mock) {
        self.rt.block_on(mock.mount(&self.server));
    }

    pub fn config(&self) -> Config {
        Config::new(&self.server.uri(), "admin", "secret")
    }

    pub fn client(&self) -> MolgenisClient {
        MolgenisClient::new(self.config()).expect("client")
    }
}

/// REST v2 entity query answering with a match count.
#[allow(dead_code)]
pub fn total_mock(entity: &str, total: u64) -> Mock {
    Mock::given(method("GET"))
        .and(path(format!("/api/v2/{}", entity)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": total})))
}

/// Successful credential exchange.
#[allow(dead_code)]
pub fn login_mock(token: &str) -> Mock {
    Mock::given(method("POST"))
        .and(path("/api/v1/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": token})))
}

/// Version endpoint.
#[allow(dead_code)]
pub fn version_mock(version: &str) -> Mock {
    Mock::given(method("GET"))
        .and(path("/api/v2/version"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"molgenisVersion": version})))
}
