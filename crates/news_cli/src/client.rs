use anyhow::bail;
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use news_rpc::proto::{CreateNewsRequest, CreateNewsResponse, GetNewsResponse};
use news_rpc::{violations, NewsClient};
use serde::Serialize;
use tonic::Status;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Args, Debug)]
pub struct ClientArgs {
    /// Server URL
    #[arg(long, env = "NEWS_ENDPOINT", default_value = "http://127.0.0.1:8080")]
    pub endpoint: String,
    /// Shared secret sent as `authorization` metadata
    #[arg(long, env = "NEWS_AUTH_TOKEN")]
    pub auth_token: Option<String>,
    #[command(subcommand)]
    pub command: ClientCommands,
}

#[derive(Subcommand, Debug)]
pub enum ClientCommands {
    /// Publish one article
    Create {
        /// Article id, a fresh UUID when omitted
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        author: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        summary: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        source: String,
        /// Repeat for several tags
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Fetch one article by id
    Get { id: String },
    /// Stream every article
    List,
    /// Publish `count` sample articles, then stream them all back
    Seed {
        #[arg(long, default_value_t = 5)]
        count: usize,
    },
}

/// JSON shape printed for every article.
#[derive(Debug, Serialize)]
struct NewsOutput {
    id: String,
    author: String,
    title: String,
    summary: String,
    content: String,
    source: String,
    tags: Vec<String>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

fn to_datetime(ts: Option<prost_types::Timestamp>) -> Option<DateTime<Utc>> {
    ts.and_then(|ts| DateTime::from_timestamp(ts.seconds, ts.nanos.max(0) as u32))
}

impl From<GetNewsResponse> for NewsOutput {
    fn from(news: GetNewsResponse) -> Self {
        Self {
            id: news.id,
            author: news.author,
            title: news.title,
            summary: news.summary,
            content: news.content,
            source: news.source,
            tags: news.tags,
            created_at: to_datetime(news.created_at),
            updated_at: to_datetime(news.updated_at),
        }
    }
}

impl From<CreateNewsResponse> for NewsOutput {
    fn from(news: CreateNewsResponse) -> Self {
        Self {
            id: news.id,
            author: news.author,
            title: news.title,
            summary: news.summary,
            content: news.content,
            source: news.source,
            tags: news.tags,
            created_at: to_datetime(news.created_at),
            updated_at: to_datetime(news.updated_at),
        }
    }
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Log a failed call with its structured violations and turn it into an error.
fn report(method: &str, status: Status) -> anyhow::Error {
    for violation in violations(&status) {
        error!(
            method,
            kind = %violation.r#type,
            subject = %violation.subject,
            description = %violation.description,
            "violation"
        );
    }
    anyhow::anyhow!("{method} failed: {:?}: {}", status.code(), status.message())
}

fn sample_request(i: usize) -> CreateNewsRequest {
    CreateNewsRequest {
        id: Uuid::new_v4().to_string(),
        author: format!("Test Author {i}"),
        title: "Test".to_string(),
        summary: "Test".to_string(),
        content: "Test".to_string(),
        source: "https://news.example.com".to_string(),
        tags: vec!["Test".to_string()],
    }
}

pub async fn run(args: ClientArgs) -> anyhow::Result<()> {
    let mut client = NewsClient::connect(args.endpoint, args.auth_token.as_deref()).await?;

    match args.command {
        ClientCommands::Create {
            id,
            author,
            title,
            summary,
            content,
            source,
            tags,
        } => {
            let request = CreateNewsRequest {
                id: id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                author,
                title,
                summary,
                content,
                source,
                tags,
            };
            let created = client
                .create(request)
                .await
                .map_err(|s| report("CreateNews", s))?;
            print_json(&NewsOutput::from(created))?;
        }
        ClientCommands::Get { id } => {
            let news = client.get(id).await.map_err(|s| report("GetNews", s))?;
            print_json(&NewsOutput::from(news))?;
        }
        ClientCommands::List => {
            let all = client.list().await.map_err(|s| report("GetAll", s))?;
            let all: Vec<NewsOutput> = all.into_iter().map(NewsOutput::from).collect();
            print_json(&all)?;
        }
        ClientCommands::Seed { count } => {
            if count == 0 {
                bail!("--count must be at least 1");
            }
            info!(count, "starting to bulk create news");
            for i in 0..count {
                client
                    .create(sample_request(i))
                    .await
                    .map_err(|s| report("CreateNews", s))?;
            }
            info!("bulk news created successfully");

            let all = client.list().await.map_err(|s| report("GetAll", s))?;
            for news in &all {
                info!(author = %news.author, id = %news.id, "got news");
            }
            info!(total = all.len(), "got all news successfully");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_datetime() {
        let ts = prost_types::Timestamp {
            seconds: 1_700_000_000,
            nanos: 5,
        };
        let at = to_datetime(Some(ts)).unwrap();
        assert_eq!(at.timestamp(), 1_700_000_000);
        assert_eq!(at.timestamp_subsec_nanos(), 5);
        assert!(to_datetime(None).is_none());
    }

    #[test]
    fn test_sample_requests_are_valid_drafts() {
        for i in 0..3 {
            assert!(news_core::validate_article(sample_request(i).into()).is_ok());
        }
    }

    #[test]
    fn test_report_includes_code_and_message() {
        let err = report("GetNews", Status::not_found("news 1 not found"));
        let message = err.to_string();
        assert!(message.contains("GetNews failed"));
        assert!(message.contains("NotFound"));
        assert!(message.contains("news 1 not found"));
    }
}
