//! Shared-secret authentication for the news service.

use std::sync::Arc;

use tonic::metadata::{Ascii, MetadataValue};
use tonic::service::Interceptor;
use tonic::{Request, Status};

pub const AUTHORIZATION_HEADER: &str = "authorization";

/// Server-side check of the `authorization` metadata.
///
/// Without a configured token every call is admitted.
#[derive(Debug, Clone, Default)]
pub struct AuthInterceptor {
    token: Option<Arc<str>>,
}

impl AuthInterceptor {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.map(Arc::from),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.token.is_some()
    }
}

impl Interceptor for AuthInterceptor {
    fn call(&mut self, request: Request<()>) -> Result<Request<()>, Status> {
        let Some(expected) = self.token.as_deref() else {
            return Ok(request);
        };

        match request.metadata().get(AUTHORIZATION_HEADER) {
            Some(value) if value.as_bytes() == expected.as_bytes() => {
                tracing::debug!("successfully authenticated");
                Ok(request)
            }
            _ => Err(Status::unauthenticated("missing authorization token")),
        }
    }
}

/// Client-side interceptor attaching the shared secret to each call.
#[derive(Debug, Clone, Default)]
pub struct ClientAuth {
    token: Option<MetadataValue<Ascii>>,
}

impl ClientAuth {
    pub fn new(
        token: Option<&str>,
    ) -> Result<Self, tonic::metadata::errors::InvalidMetadataValue> {
        let token = token.map(str::parse).transpose()?;
        Ok(Self { token })
    }
}

impl Interceptor for ClientAuth {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        if let Some(token) = &self.token {
            request
                .metadata_mut()
                .insert(AUTHORIZATION_HEADER, token.clone());
        }
        Ok(request)
    }
}
