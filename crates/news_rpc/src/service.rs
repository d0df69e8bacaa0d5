use std::sync::Arc;

use news_core::{parse_article_id, validate_article, ArticleRecord, ArticleStorage, Error};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Request, Response, Status};
use tracing::Instrument;

use crate::proto::news_service_server::NewsService;
use crate::proto::{CreateNewsRequest, CreateNewsResponse, GetNewsRequest, GetNewsResponse};
use crate::status::error_to_status;

/// Responses buffered ahead of a slow `GetAll` reader.
const STREAM_BUFFER: usize = 16;

/// gRPC front of the article store.
#[derive(Clone)]
pub struct NewsGrpcService {
    storage: Arc<dyn ArticleStorage>,
}

impl NewsGrpcService {
    pub fn new(storage: Arc<dyn ArticleStorage>) -> Self {
        Self { storage }
    }
}

#[tonic::async_trait]
impl NewsService for NewsGrpcService {
    #[tracing::instrument(skip_all, fields(endpoint = "CreateNews"))]
    async fn create_news(
        &self,
        request: Request<CreateNewsRequest>,
    ) -> Result<Response<CreateNewsResponse>, Status> {
        let request = request.into_inner();
        tracing::debug!(request_data = ?request, "received request from client");

        let article = validate_article(request.into()).map_err(|e| error_to_status(e.into()))?;
        let created = self
            .storage
            .create_article(article)
            .await
            .map_err(error_to_status)?;

        tracing::info!(status = "successfully", id = %created.id, "📰 news created");
        Ok(Response::new(created.into()))
    }

    #[tracing::instrument(skip_all, fields(endpoint = "GetNews"))]
    async fn get_news(
        &self,
        request: Request<GetNewsRequest>,
    ) -> Result<Response<GetNewsResponse>, Status> {
        let request = request.into_inner();
        tracing::debug!(request_data = ?request, "received request from client");

        let id = parse_article_id(&request.id).map_err(error_to_status)?;
        let article = self
            .storage
            .get_article(id)
            .await
            .map_err(error_to_status)?
            .ok_or_else(|| error_to_status(Error::NotFound(id)))?;

        tracing::info!(status = "successfully", %id, "news fetched");
        Ok(Response::new(article.into()))
    }

    type GetAllStream = ReceiverStream<Result<GetNewsResponse, Status>>;

    #[tracing::instrument(skip_all, fields(endpoint = "GetAll"))]
    async fn get_all(&self, _request: Request<()>) -> Result<Response<Self::GetAllStream>, Status> {
        tracing::debug!("received request from client");

        let articles = self
            .storage
            .list_articles()
            .await
            .map_err(error_to_status)?;
        let (stream, _producer) = stream_articles(articles);
        Ok(Response::new(stream))
    }
}

/// Feed `articles` into a bounded stream from a background task.
///
/// The task stops at the first failed send and resolves to the number of
/// responses it handed over.
fn stream_articles(
    articles: Vec<ArticleRecord>,
) -> (ReceiverStream<Result<GetNewsResponse, Status>>, JoinHandle<usize>) {
    let total = articles.len();
    let (tx, rx) = mpsc::channel(STREAM_BUFFER);
    let producer = tokio::spawn(
        async move {
            let mut sent = 0;
            for article in articles {
                if tx.send(Ok(GetNewsResponse::from(article))).await.is_err() {
                    tracing::warn!(sent, total, "client went away, stream aborted");
                    return sent;
                }
                sent += 1;
            }
            tracing::info!(status = "successfully", sent, "news streamed");
            sent
        }
        .in_current_span(),
    );
    (ReceiverStream::new(rx), producer)
}
