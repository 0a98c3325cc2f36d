use crate::error::{ApiError, ApiResult};
use crate::models::*;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use std::path::Path;

pub const DOCUMENTS_PATH: &str = "/api/documents";
pub const UPLOAD_PATH: &str = "/api/upload";
pub const CHAT_PATH: &str = "/api/chat";
pub const SEARCH_PATH: &str = "/api/search";
pub const SUMMARIZE_PATH: &str = "/api/summarize";
pub const REFERAT_PATH: &str = "/api/referat";
pub const WEB_SEARCH_PATH: &str = "/api/websearch";
pub const HEALTH_PATH: &str = "/health";

/// A file picked for upload, already read into memory.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub async fn read(path: &Path) -> ApiResult<Self> {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| {
                ApiError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("not a file: {}", path.display()),
                ))
            })?;
        let bytes = tokio::fs::read(path).await?;
        Ok(Self { filename, bytes })
    }
}

/// The backend as the controller sees it. One method per endpoint.
#[async_trait]
pub trait DocumentApi: Send + Sync {
    async fn list_documents(&self) -> ApiResult<Vec<DocumentSummary>>;

    async fn get_document(&self, id: DocumentId) -> ApiResult<DocumentSummary>;

    async fn upload(&self, file: UploadFile) -> ApiResult<MessageResponse>;

    async fn delete_document(&self, id: DocumentId) -> ApiResult<MessageResponse>;

    async fn chat(&self, request: &ChatRequest) -> ApiResult<ChatResponse>;

    async fn search(&self, request: &ChatRequest) -> ApiResult<SearchResponse>;

    async fn summarize(&self, id: DocumentId) -> ApiResult<SummaryResponse>;

    async fn referat(&self, id: DocumentId) -> ApiResult<ReferatResponse>;

    async fn web_search(&self, request: &WebSearchRequest) -> ApiResult<WebSearchResponse>;

    async fn health(&self) -> ApiResult<HealthResponse>;
}

/// JSON-over-HTTP client for the document chat backend. No retries, no timeouts.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    origin: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> ApiResult<Self> {
        let parsed = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        if !parsed.has_host() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            origin: parsed.origin().ascii_serialization(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Scheme, host and port of the backend, used to absolutize server paths.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_json<T: DeserializeOwned>(endpoint: &'static str, response: Response) -> ApiResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.detail);
            log::warn!("{} failed with {}: {}", endpoint, status, body);
            return Err(ApiError::Status {
                endpoint,
                status: status.as_u16(),
                detail,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn post_json<B, T>(&self, endpoint: &'static str, body: &B) -> ApiResult<T>
    where
        B: serde::Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        log::debug!("POST {}", endpoint);
        let response = self
            .client
            .post(self.url(endpoint))
            .json(body)
            .send()
            .await?;
        Self::read_json(endpoint, response).await
    }
}

#[async_trait]
impl DocumentApi for ApiClient {
    async fn list_documents(&self) -> ApiResult<Vec<DocumentSummary>> {
        log::debug!("GET {}", DOCUMENTS_PATH);
        let response = self.client.get(self.url(DOCUMENTS_PATH)).send().await?;
        Self::read_json(DOCUMENTS_PATH, response).await
    }

    async fn get_document(&self, id: DocumentId) -> ApiResult<DocumentSummary> {
        let path = format!("{}/{}", DOCUMENTS_PATH, id);
        log::debug!("GET {}", path);
        let response = self.client.get(self.url(&path)).send().await?;
        Self::read_json(DOCUMENTS_PATH, response).await
    }

    async fn upload(&self, file: UploadFile) -> ApiResult<MessageResponse> {
        log::debug!("POST {} ({}, {} bytes)", UPLOAD_PATH, file.filename, file.bytes.len());
        let part = Part::bytes(file.bytes).file_name(file.filename);
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.url(UPLOAD_PATH))
            .multipart(form)
            .send()
            .await?;
        Self::read_json(UPLOAD_PATH, response).await
    }

    async fn delete_document(&self, id: DocumentId) -> ApiResult<MessageResponse> {
        let path = format!("{}/{}", DOCUMENTS_PATH, id);
        log::debug!("DELETE {}", path);
        let response = self.client.delete(self.url(&path)).send().await?;
        Self::read_json(DOCUMENTS_PATH, response).await
    }

    async fn chat(&self, request: &ChatRequest) -> ApiResult<ChatResponse> {
        self.post_json(CHAT_PATH, request).await
    }

    async fn search(&self, request: &ChatRequest) -> ApiResult<SearchResponse> {
        self.post_json(SEARCH_PATH, request).await
    }

    async fn summarize(&self, id: DocumentId) -> ApiResult<SummaryResponse> {
        self.post_json(SUMMARIZE_PATH, &DocumentRequest { document_id: id }).await
    }

    async fn referat(&self, id: DocumentId) -> ApiResult<ReferatResponse> {
        self.post_json(REFERAT_PATH, &DocumentRequest { document_id: id }).await
    }

    async fn web_search(&self, request: &WebSearchRequest) -> ApiResult<WebSearchResponse> {
        self.post_json(WEB_SEARCH_PATH, request).await
    }

    async fn health(&self) -> ApiResult<HealthResponse> {
        log::debug!("GET {}", HEALTH_PATH);
        let response = self.client.get(self.url(HEALTH_PATH)).send().await?;
        Self::read_json(HEALTH_PATH, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_drops_path_and_trailing_slash() {
        let client = ApiClient::new("http://localhost:8000/app/").unwrap();
        assert_eq!(client.origin(), "http://localhost:8000");
        assert_eq!(client.base_url(), "http://localhost:8000/app");
        assert_eq!(client.url(CHAT_PATH), "http://localhost:8000/app/api/chat");
    }

    #[test]
    fn rejects_relative_base_url() {
        assert!(matches!(
            ApiClient::new("/api"),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn upload_file_takes_name_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("отчёт.txt");
        tokio::fs::write(&path, b"hello").await.unwrap();

        let file = UploadFile::read(&path).await.unwrap();
        assert_eq!(file.filename, "отчёт.txt");
        assert_eq!(file.bytes, b"hello");
    }
}
