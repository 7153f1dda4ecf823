use super::routes::create_routes;
use super::state::AppState;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Bind `addr` and serve until `state.shutdown` is cancelled.
pub async fn start_server(state: AppState, addr: &str) -> std::io::Result<()> {
    let shutdown = state.shutdown.clone();
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    info!("Web page listening on http://{}", local);
    println!("Nico is listening on http://{}", local);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            info!("Shutting down web page");
        })
        .await
}

pub fn create_app(state: AppState) -> Router {
    create_routes(state).layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nico_application::{
        AskAssistantUseCase, AssistantSettings, GatewayError, GenerationRequest, LlmGateway,
    };
    use std::sync::Arc;
    use tokio_util::sync::CancellationToken;

    struct Silent;

    #[async_trait::async_trait]
    impl LlmGateway for Silent {
        async fn generate(&self, _request: &GenerationRequest) -> Result<String, GatewayError> {
            Ok(String::new())
        }
    }

    #[tokio::test]
    async fn stops_when_cancelled() {
        let token = CancellationToken::new();
        let state = AppState::new(
            Arc::new(AskAssistantUseCase::new(Arc::new(Silent))),
            AssistantSettings::default(),
        )
        .with_shutdown(token.clone());

        let server = tokio::spawn(async move { start_server(state, "127.0.0.1:0").await });
        token.cancel();
        let result = server.await.unwrap();
        assert!(result.is_ok());
    }
}
