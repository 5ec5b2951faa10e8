//! # API Client
//!
//! Issues every request of the dashboard against the configured base URL.
//! JSON for reads and login, multipart for create/update.

use crate::dashboard::models::{FieldValue, FormDraft, Page, RecordId, Resource};
use crate::dashboard::services::errors::ApiError;
use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Fixed page size requested from list endpoints
pub const PAGE_LIMIT: u32 = 20;

/// Login form payload
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Endpoint a draft is submitted to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveTarget {
    Create,
    Update(RecordId),
}

impl SaveTarget {
    fn path<R: Resource>(&self) -> String {
        match self {
            SaveTarget::Create => format!("{}/create", R::COLLECTION),
            SaveTarget::Update(id) => format!("{}/update/{}", R::COLLECTION, id),
        }
    }
}

/// Connection settings taken from the profile
#[derive(Debug, Clone)]
pub struct ConnectionOptions {
    pub insecure: bool,
    pub timeout: Duration,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            insecure: false,
            timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP client bound to one backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url` (e.g. `https://api.example.com/v1`)
    pub fn new(base_url: &str, options: &ConnectionOptions) -> Result<Self, ApiError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        reqwest::Url::parse(trimmed).map_err(|_| ApiError::InvalidBaseUrl(base_url.to_string()))?;

        tracing::debug!("Creating ApiClient for {}", trimmed);
        let http = reqwest::Client::builder()
            .timeout(options.timeout)
            .danger_accept_invalid_certs(options.insecure)
            .build()?;

        Ok(Self {
            http,
            base_url: trimmed.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// `POST /login`
    pub async fn login(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.endpoint("login"))
            .json(credentials)
            .send()
            .await?;
        Self::ensure_success(response).await?;
        tracing::info!("Login accepted for {}", credentials.email);
        Ok(())
    }

    /// `GET /{collection}?page&limit`
    pub async fn list<R: Resource>(&self, page: u32, limit: u32) -> Result<Page<R>, ApiError> {
        let response = self
            .http
            .get(self.endpoint(R::COLLECTION))
            .query(&[("page", page), ("limit", limit)])
            .send()
            .await?;
        let payload = Self::json_body(Self::ensure_success(response).await?).await?;
        let page_data = Page::from_payload(payload)?;

        tracing::info!(
            "Fetched {} page {}: {} records of {} pages",
            R::COLLECTION,
            page,
            page_data.records.len(),
            page_data.total_pages
        );
        Ok(page_data)
    }

    /// `GET /{collection}/{id}/detail`
    pub async fn detail<R: Resource>(&self, id: &RecordId) -> Result<FormDraft, ApiError> {
        let response = self
            .http
            .get(self.endpoint(&format!("{}/{}/detail", R::COLLECTION, id)))
            .send()
            .await?;
        let payload = Self::json_body(Self::ensure_success(response).await?).await?;
        Ok(FormDraft::from_detail(payload)?)
    }

    /// `POST /{collection}/create` or `POST /{collection}/update/{id}` as multipart
    pub async fn save<R: Resource>(
        &self,
        target: &SaveTarget,
        draft: &FormDraft,
    ) -> Result<(), ApiError> {
        let form = Self::multipart(draft).await?;
        let url = self.endpoint(&target.path::<R>());
        tracing::debug!("Submitting {} fields to {}", draft.len(), url);

        let response = self.http.post(url).multipart(form).send().await?;
        let status = response.status();
        match status {
            StatusCode::OK | StatusCode::CREATED => {
                tracing::info!("Saved {} ({})", R::KIND.noun(), status);
                Ok(())
            }
            s if s.is_success() => Err(ApiError::UnexpectedStatus(s)),
            _ => Err(Self::rejected(response).await),
        }
    }

    /// Encode every draft field; attachments are read from disk now
    async fn multipart(draft: &FormDraft) -> Result<Form, ApiError> {
        let mut form = Form::new();
        for (name, value) in draft.iter() {
            form = match value {
                FieldValue::Text(text) => form.text(name.clone(), text.clone()),
                FieldValue::File(attachment) => {
                    let bytes = tokio::fs::read(attachment.path()).await.map_err(|source| {
                        ApiError::Attachment {
                            path: attachment.path().to_path_buf(),
                            source,
                        }
                    })?;
                    let part = Part::bytes(bytes).file_name(attachment.file_name().to_string());
                    form.part(name.clone(), part)
                }
            };
        }
        Ok(form)
    }

    async fn ensure_success(response: Response) -> Result<Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::rejected(response).await)
        }
    }

    async fn rejected(response: Response) -> ApiError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::debug!("Request rejected with {}: {}", status, body);
        ApiError::Status { status, body }
    }

    async fn json_body(response: Response) -> Result<Value, ApiError> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::models::{Attachment, Exercise, Expert};
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn save_target_should_map_to_endpoints() {
        assert_eq!(SaveTarget::Create.path::<Expert>(), "experts/create");
        assert_eq!(
            SaveTarget::Update(RecordId::from(9_u64)).path::<Exercise>(),
            "exercises/update/9"
        );
    }

    #[test]
    fn new_should_trim_trailing_slash() {
        let client = ApiClient::new("http://localhost:8080/api/", &ConnectionOptions::default())
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api");
        assert_eq!(client.endpoint("login"), "http://localhost:8080/api/login");
    }

    #[test]
    fn new_should_reject_invalid_base_url() {
        let result = ApiClient::new("not a url", &ConnectionOptions::default());
        assert!(matches!(result, Err(ApiError::InvalidBaseUrl(_))));
    }

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(&server.uri(), &ConnectionOptions::default()).unwrap()
    }

    #[tokio::test]
    async fn list_should_send_page_and_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/experts"))
            .and(query_param("page", "2"))
            .and(query_param("limit", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "experts": [{ "id": 5, "name": "Dr. Ada", "specialization_string": "Psychiatry" }],
                "total_page": 4
            })))
            .mount(&server)
            .await;

        let page = client_for(&server)
            .list::<Expert>(2, PAGE_LIMIT)
            .await
            .unwrap();
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.records[0].name, "Dr. Ada");
    }

    #[tokio::test]
    async fn detail_should_build_draft() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/exercises/4/detail"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "title": "Yoga Flow",
                "type": 3,
                "media_url": null
            })))
            .mount(&server)
            .await;

        let draft = client_for(&server)
            .detail::<Exercise>(&RecordId::from(4_u64))
            .await
            .unwrap();
        assert_eq!(draft.text("title"), "Yoga Flow");
        assert_eq!(draft.text("type"), "3");
        assert!(draft.get("media_url").is_none());
    }

    #[tokio::test]
    async fn save_should_keep_rejection_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/experts/create"))
            .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"error":"taken"}"#))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .save::<Expert>(&SaveTarget::Create, &Expert::empty_draft())
            .await
            .unwrap_err();
        assert!(err.is_bad_request());
        assert_eq!(err.rejection().map(|(_, body)| body), Some(r#"{"error":"taken"}"#));
    }

    #[tokio::test]
    async fn save_should_flag_other_success_statuses() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/exercises/update/8"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .save::<Exercise>(
                &SaveTarget::Update(RecordId::from(8_u64)),
                &Exercise::empty_draft(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedStatus(StatusCode::NO_CONTENT)));
    }

    #[tokio::test]
    async fn save_should_report_unreadable_attachment() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("avatar.png");
        std::fs::write(&file, b"png").unwrap();

        let mut draft = Expert::empty_draft();
        draft.set_attachment(Expert::MEDIA_FIELD, Attachment::from_path(&file).unwrap());
        std::fs::remove_file(&file).unwrap();

        let err = client_for(&server)
            .save::<Expert>(&SaveTarget::Create, &draft)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Attachment { .. }));
    }
}
