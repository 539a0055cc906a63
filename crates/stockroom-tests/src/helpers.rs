//! Shared setup for wiremock-backed tests.

use stockroom_client::ApiClient;
use wiremock::MockServer;

pub async fn start_backend() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock backend, authenticated with a test token.
pub fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(server.uri(), Some("tok_test".to_string()))
}
