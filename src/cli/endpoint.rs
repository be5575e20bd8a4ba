//! Endpoint command implementation

use crate::cli::EndpointArgs;
use crate::dispatch::Dispatcher;

/// Handle `notedeck endpoint`: print the endpoint a request issued now
/// would try first.
pub async fn handle_endpoint(
    args: &EndpointArgs,
    dispatcher: &Dispatcher,
) -> Result<String, Box<dyn std::error::Error>> {
    if args.probe {
        dispatcher.probe_all().await;
    }

    match dispatcher.preview_endpoint() {
        Some(endpoint) => Ok(endpoint.url().to_string()),
        None => Err("no endpoints configured".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_endpoint_without_probe_is_first_configured() {
        let dispatcher = Dispatcher::from_config(&ClientConfig {
            endpoints: vec!["http://127.0.0.1:1".to_string(), "http://127.0.0.1:2".to_string()],
            ..Default::default()
        });
        let output = handle_endpoint(&EndpointArgs { probe: false }, &dispatcher)
            .await
            .unwrap();
        assert_eq!(output, "http://127.0.0.1:1");
    }

    #[tokio::test]
    async fn test_endpoint_with_probe_skips_dead_first() {
        let up = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&up)
            .await;

        let dispatcher = Dispatcher::from_config(&ClientConfig {
            endpoints: vec!["http://127.0.0.1:1".to_string(), up.uri()],
            probe_timeout_ms: 300,
            ..Default::default()
        });
        let output = handle_endpoint(&EndpointArgs { probe: true }, &dispatcher)
            .await
            .unwrap();
        assert_eq!(output, up.uri());
    }
}
