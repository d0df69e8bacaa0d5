//! gRPC surface of the news service: wire types, the service
//! implementation, error mapping, auth and server/client plumbing.

pub mod auth;
pub mod client;
pub mod convert;
pub mod server;
pub mod service;
pub mod status;

pub mod proto {
    tonic::include_proto!("news.v1");
}

pub use auth::{AuthInterceptor, ClientAuth, AUTHORIZATION_HEADER};
pub use client::{ClientError, NewsClient};
pub use server::NewsServer;
pub use service::NewsGrpcService;
pub use status::{error_to_status, violations};
