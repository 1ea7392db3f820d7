use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::Edition;
use super::types::{ApiError, GeneratorResponse, PageResponse, SearchResponse};
use crate::config::Config;

/// Parameters sent with every request: JSON output, array-shaped pages, anonymous CORS.
const COMMON_PARAMS: &[(&str, &str)] = &[
    ("action", "query"),
    ("format", "json"),
    ("formatversion", "2"),
    ("origin", "*"),
];

const IMAGE_SEARCH_LIMIT: &str = "8";
const IMAGE_THUMB_WIDTH: &str = "600";
const VIDEO_SEARCH_LIMIT: &str = "10";
const VIDEO_THUMB_WIDTH: &str = "400";
const FILE_NAMESPACE: &str = "6";
const EXTERNAL_LINK_LIMIT: &str = "5";

#[derive(Debug, thiserror::Error)]
pub enum WikiError {
    #[error("Wikipedia rate limit exceeded. Please retry later.")]
    RateLimited,

    #[error("Wikipedia API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("Wikipedia rejected the request ({code}): {info}")]
    Rejected { code: String, info: String },

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("page not found: {0}")]
    MissingPage(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Read-only access to the encyclopedia's query API.
/// Implemented by `WikiClient` for production; mock implementations used in tests.
pub trait WikiApi {
    /// Full-text search of one edition's index.
    async fn search(&self, edition: Edition, query: &str) -> Result<SearchResponse, WikiError>;

    /// Intro extract, canonical URL and external links for one title.
    async fn page_details(
        &self,
        edition: Edition,
        title: &str,
    ) -> Result<PageResponse, WikiError>;

    /// Full-edition pages matching `query` that carry a thumbnail image.
    async fn image_pages(&self, query: &str) -> Result<GeneratorResponse, WikiError>;

    /// Full-edition files matching `query` with a video filetype hint.
    async fn video_files(&self, query: &str) -> Result<GeneratorResponse, WikiError>;
}

#[derive(Clone)]
pub struct WikiClient {
    http: Client,
    simple_endpoint: Url,
    full_endpoint: Url,
}

impl WikiClient {
    pub fn new(http: Client, config: &Config) -> Self {
        Self {
            http,
            simple_endpoint: config.simple_endpoint.clone(),
            full_endpoint: config.full_endpoint.clone(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        let endpoint = |edition: &str| {
            Url::parse(&format!("{base_url}/{edition}/w/api.php"))
                .unwrap_or_else(|e| panic!("bad test base url {base_url}: {e}"))
        };
        Self {
            http,
            simple_endpoint: endpoint("simple"),
            full_endpoint: endpoint("en"),
        }
    }

    fn endpoint(&self, edition: Edition) -> &Url {
        match edition {
            Edition::Simple => &self.simple_endpoint,
            Edition::En => &self.full_endpoint,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        edition: Edition,
        params: &[(&str, &str)],
    ) -> Result<T, WikiError> {
        let mut url = self.endpoint(edition).clone();
        url.query_pairs_mut()
            .extend_pairs(COMMON_PARAMS)
            .extend_pairs(params);

        let response = self
            .http
            .get(url)
            .header("User-Agent", crate::USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!(%edition, "Wikipedia API rate limited");
            return Err(WikiError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let snippet: String = text.chars().take(200).collect();
            warn!(%edition, status = %status, "Wikipedia API error");
            return Err(WikiError::Api {
                code: status.as_u16(),
                message: format!("HTTP {status}: {snippet}"),
            });
        }

        let text = response.text().await?;
        let body: serde_json::Value = serde_json::from_str(&text)?;

        if let Some(err) = body.get("error") {
            let classified = classify_api_error(err);
            warn!(%edition, error = %classified, "Wikipedia API error in 200 response");
            return Err(classified);
        }

        debug!(%edition, bytes = text.len(), "wiki request complete");
        Ok(serde_json::from_value(body)?)
    }
}

impl WikiApi for WikiClient {
    async fn search(&self, edition: Edition, query: &str) -> Result<SearchResponse, WikiError> {
        self.get_json(edition, &[("list", "search"), ("srsearch", query)])
            .await
    }

    async fn page_details(
        &self,
        edition: Edition,
        title: &str,
    ) -> Result<PageResponse, WikiError> {
        self.get_json(
            edition,
            &[
                ("prop", "extracts|info|extlinks"),
                ("titles", title),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("inprop", "url"),
                ("ellimit", EXTERNAL_LINK_LIMIT),
                ("redirects", "1"),
            ],
        )
        .await
    }

    async fn image_pages(&self, query: &str) -> Result<GeneratorResponse, WikiError> {
        self.get_json(
            Edition::En,
            &[
                ("generator", "search"),
                ("gsrsearch", query),
                ("gsrlimit", IMAGE_SEARCH_LIMIT),
                ("prop", "pageimages"),
                ("pithumbsize", IMAGE_THUMB_WIDTH),
            ],
        )
        .await
    }

    async fn video_files(&self, query: &str) -> Result<GeneratorResponse, WikiError> {
        let search = format!("{query} filetype:video");
        self.get_json(
            Edition::En,
            &[
                ("generator", "search"),
                ("gsrsearch", &search),
                ("gsrnamespace", FILE_NAMESPACE),
                ("gsrlimit", VIDEO_SEARCH_LIMIT),
                ("prop", "imageinfo"),
                ("iiprop", "url|mime|thumb"),
                ("iiurlwidth", VIDEO_THUMB_WIDTH),
            ],
        )
        .await
    }
}

fn classify_api_error(err: &serde_json::Value) -> WikiError {
    let parsed: Option<ApiError> = serde_json::from_value(err.clone()).ok();
    let (code, info) = parsed
        .map(|e| (e.code, e.info))
        .unwrap_or_default();

    if code.as_deref() == Some("ratelimited") {
        return WikiError::RateLimited;
    }
    WikiError::Rejected {
        code: code.unwrap_or_else(|| "unknown".to_string()),
        info: info.unwrap_or_else(|| "Unknown error".to_string()),
    }
}
