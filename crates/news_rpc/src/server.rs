use std::future::Future;
use std::sync::Arc;

use news_core::ArticleStorage;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tower_http::trace::TraceLayer;

use crate::auth::AuthInterceptor;
use crate::proto::news_service_server::NewsServiceServer;
use crate::service::NewsGrpcService;

/// Everything needed to run the news gRPC endpoint.
pub struct NewsServer {
    storage: Arc<dyn ArticleStorage>,
    auth: AuthInterceptor,
}

impl NewsServer {
    pub fn new(storage: Arc<dyn ArticleStorage>) -> Self {
        Self {
            storage,
            auth: AuthInterceptor::default(),
        }
    }

    /// Require `authorization` metadata equal to `token` on news calls.
    pub fn with_auth_token(mut self, token: Option<String>) -> Self {
        self.auth = AuthInterceptor::new(token);
        self
    }

    /// Serve on `listener` until `shutdown` resolves.
    ///
    /// The health service is registered alongside the news service and is
    /// reachable without credentials.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), tonic::transport::Error>
    where
        F: Future<Output = ()> + Send,
    {
        let (health_reporter, health_service) = tonic_health::server::health_reporter();
        health_reporter
            .set_serving::<NewsServiceServer<NewsGrpcService>>()
            .await;
        log_stored(self.storage.as_ref(), "news service marked serving").await;

        if !self.auth.is_enabled() {
            tracing::warn!("no auth token configured, news calls are unauthenticated");
        }

        let storage = self.storage.clone();
        let news_service = NewsServiceServer::with_interceptor(
            NewsGrpcService::new(self.storage),
            self.auth,
        );

        Server::builder()
            .layer(TraceLayer::new_for_grpc())
            .add_service(health_service)
            .add_service(news_service)
            .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
            .await?;

        health_reporter
            .set_not_serving::<NewsServiceServer<NewsGrpcService>>()
            .await;
        log_stored(storage.as_ref(), "news service stopped").await;
        Ok(())
    }
}

async fn log_stored(storage: &dyn ArticleStorage, message: &str) {
    match storage.count().await {
        Ok(stored) => tracing::info!(stored, "{message}"),
        Err(e) => tracing::warn!(error = %e, "failed to count stored news"),
    }
}
