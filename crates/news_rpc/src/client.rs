use std::time::Duration;

use thiserror::Error;
use tonic::service::interceptor::InterceptedService;
use tonic::transport::{Channel, Endpoint};
use tonic::Status;

use crate::auth::ClientAuth;
use crate::proto::news_service_client::NewsServiceClient;
use crate::proto::{CreateNewsRequest, CreateNewsResponse, GetNewsRequest, GetNewsResponse};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(10);
const KEEP_ALIVE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Invalid auth token: {0}")]
    InvalidToken(#[from] tonic::metadata::errors::InvalidMetadataValue),

    #[error("Transport error: {0}")]
    Transport(#[from] tonic::transport::Error),
}

/// Thin wrapper over the generated client that attaches credentials.
#[derive(Clone)]
pub struct NewsClient {
    inner: NewsServiceClient<InterceptedService<Channel, ClientAuth>>,
}

impl NewsClient {
    pub async fn connect(endpoint: impl Into<String>, token: Option<&str>) -> Result<Self, ClientError> {
        let endpoint = endpoint.into();
        let auth = ClientAuth::new(token)?;
        let channel = Endpoint::from_shared(endpoint.clone())
            .map_err(|e| ClientError::InvalidEndpoint(format!("{endpoint}: {e}")))?
            .connect_timeout(CONNECT_TIMEOUT)
            .http2_keep_alive_interval(KEEP_ALIVE_INTERVAL)
            .keep_alive_timeout(KEEP_ALIVE_TIMEOUT)
            .keep_alive_while_idle(true)
            .connect()
            .await?;

        tracing::debug!(%endpoint, "connected to news service");
        Ok(Self {
            inner: NewsServiceClient::with_interceptor(channel, auth),
        })
    }

    pub async fn create(&mut self, request: CreateNewsRequest) -> Result<CreateNewsResponse, Status> {
        tracing::debug!(method = "CreateNews", "calling remote server");
        Ok(self.inner.create_news(request).await?.into_inner())
    }

    pub async fn get(&mut self, id: impl Into<String>) -> Result<GetNewsResponse, Status> {
        tracing::debug!(method = "GetNews", "calling remote server");
        let request = GetNewsRequest { id: id.into() };
        Ok(self.inner.get_news(request).await?.into_inner())
    }

    /// Drain the `GetAll` stream, stopping at the first error.
    pub async fn list(&mut self) -> Result<Vec<GetNewsResponse>, Status> {
        tracing::debug!(method = "GetAll", "calling remote server");
        let mut stream = self.inner.get_all(()).await?.into_inner();

        let mut all = Vec::new();
        while let Some(news) = stream.message().await? {
            tracing::debug!(author = %news.author, id = %news.id, "received news");
            all.push(news);
        }
        Ok(all)
    }
}
