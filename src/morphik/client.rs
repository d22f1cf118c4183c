//! HTTP client wrapper for interacting with Morphik.

use crate::morphik::{
    backend::RetrievalBackend,
    types::{CompletionResponse, Document, ListDocumentsResponse, MorphikError, QueryRequest},
    uri::{Endpoint, parse_uri},
};
use async_trait::async_trait;
use reqwest::{Client, Method, Url, multipart};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use std::path::Path;

/// `User-Agent` header sent to Morphik.
pub(crate) const USER_AGENT: &str = "ecss-navigator/0.1";

/// Lightweight HTTP client for the Morphik REST API.
#[derive(Debug, Clone)]
pub struct MorphikClient {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl MorphikClient {
    /// Construct a client from a connection URI with its own connection pool.
    pub fn from_uri(uri: &str) -> Result<Self, MorphikError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Self::with_client(client, uri)
    }

    /// Construct a client from a connection URI, sharing an existing connection pool.
    pub fn with_client(client: Client, uri: &str) -> Result<Self, MorphikError> {
        let Endpoint {
            base_url,
            auth_token,
        } = parse_uri(uri)?;
        tracing::debug!(
            url = %base_url,
            has_token = auth_token.is_some(),
            "Initialized Morphik HTTP client"
        );
        Ok(Self {
            client,
            base_url,
            auth_token,
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        self.authorize(self.client.request(method, url))
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// URL of a single document, with the identifier percent-encoded as one path segment.
    fn document_url(&self, document_id: &str) -> Result<Url, MorphikError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|err| MorphikError::InvalidUri(err.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| MorphikError::InvalidUri(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .push("documents")
            .push(document_id);
        Ok(url)
    }

    async fn decode<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        operation: &'static str,
    ) -> Result<T, MorphikError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            let error = MorphikError::UnexpectedStatus { status, body };
            tracing::error!(operation, error = %error, "Morphik request failed");
            Err(error)
        }
    }
}

#[async_trait]
impl RetrievalBackend for MorphikClient {
    async fn query(&self, request: &QueryRequest) -> Result<CompletionResponse, MorphikError> {
        tracing::debug!(
            query = %request.query,
            filters = request.filters.len(),
            "Querying Morphik"
        );
        let response = self
            .request(Method::POST, "query")
            .json(request)
            .send()
            .await?;
        let completion: CompletionResponse = self.decode(response, "query").await?;
        tracing::debug!(
            sources = completion.sources.len(),
            has_completion = completion.completion.is_some(),
            "Morphik query completed"
        );
        Ok(completion)
    }

    async fn get_document(&self, document_id: &str) -> Result<Document, MorphikError> {
        let url = self.document_url(document_id)?;
        let response = self
            .authorize(self.client.request(Method::GET, url))
            .send()
            .await?;
        self.decode(response, "get_document").await
    }

    async fn list_documents(&self) -> Result<Vec<Document>, MorphikError> {
        let response = self
            .request(Method::POST, "documents")
            .json(&json!({}))
            .send()
            .await?;
        let listing: ListDocumentsResponse = self.decode(response, "list_documents").await?;
        Ok(listing.into_documents())
    }

    async fn ingest_file(
        &self,
        path: &Path,
        filename: &str,
        metadata: &Map<String, Value>,
        use_colpali: bool,
    ) -> Result<Document, MorphikError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| MorphikError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let size = bytes.len();
        let file = multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("application/pdf")?;
        let form = multipart::Form::new()
            .part("file", file)
            .text("metadata", Value::Object(metadata.clone()).to_string())
            .text("rules", "[]")
            .text("use_colpali", use_colpali.to_string());

        tracing::debug!(filename, size, use_colpali, "Uploading file to Morphik");
        let response = self
            .request(Method::POST, "ingest/file")
            .multipart(form)
            .send()
            .await?;
        self.decode(response, "ingest_file").await
    }
}
