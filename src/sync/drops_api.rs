use crate::config::Config;
use crate::http_client;
use crate::models::DropPost;
use isahc::prelude::*;
use isahc::HttpClient;
use isahc::Request;
use std::fmt;
use url::form_urlencoded;

/// Read access to the approved-drops feed, newest first. `drop_type`
/// narrows the result server-side.
pub trait ReadDrops: Send + Sync {
    fn fetch_approved(&self, drop_type: Option<&str>) -> Result<Vec<DropPost>, FeedError>;
}

#[derive(Debug)]
pub enum FeedError {
    Request(String),
    Status(u16),
    Parse(String),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FeedError::Request(msg) => write!(f, "{msg}"),
            FeedError::Status(code) => write!(f, "unexpected status code {code}"),
            FeedError::Parse(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<isahc::Error> for FeedError {
    fn from(error: isahc::Error) -> Self {
        FeedError::Request(format!("{error}"))
    }
}

impl From<isahc::http::Error> for FeedError {
    fn from(error: isahc::http::Error) -> Self {
        FeedError::Request(format!("{error}"))
    }
}

impl From<std::io::Error> for FeedError {
    fn from(error: std::io::Error) -> Self {
        FeedError::Request(format!("{error}"))
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(error: serde_json::Error) -> Self {
        FeedError::Parse(format!("{error}"))
    }
}

pub struct DropsApi {
    base_url: String,
    http_client: HttpClient,
}

impl DropsApi {
    pub fn new() -> Self {
        Self::with_base_url(Config::backend_url())
    }

    pub fn with_base_url(base_url: String) -> Self {
        DropsApi {
            base_url,
            http_client: http_client::client().clone(),
        }
    }

    fn approved_url(&self, drop_type: Option<&str>) -> String {
        let mut url = format!(
            "{}/api/nftdrops/approved",
            self.base_url.trim_end_matches('/')
        );

        if let Some(drop_type) = drop_type {
            let query: String = form_urlencoded::Serializer::new(String::new())
                .append_pair("droptype", drop_type)
                .finish();

            url = format!("{url}?{query}");
        }

        url
    }
}

impl Default for DropsApi {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadDrops for DropsApi {
    fn fetch_approved(&self, drop_type: Option<&str>) -> Result<Vec<DropPost>, FeedError> {
        let url = self.approved_url(drop_type);

        log::debug!("Fetching drops from {}", url);

        let request = Request::get(url)
            .header("Accept", "application/json")
            .body(())?;

        let mut response = self.http_client.send(request)?;

        if !response.status().is_success() {
            return Err(FeedError::Status(response.status().as_u16()));
        }

        let body = response.text()?;

        Ok(serde_json::from_str(&body)?)
    }
}
