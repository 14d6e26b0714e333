use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::debug;
use url::Url;

use datadrift_core::errors::DriftError;
use datadrift_protocol::report::Block;

/// Capability to persist an assembled report in the document store.
///
/// Resolution of the target document from the metric name is the store's
/// concern; callers only hand over the name and the ordered blocks.
#[async_trait]
pub trait ReportPublisher: Send + Sync {
    async fn publish(&self, metric_name: &str, blocks: &[Block]) -> Result<(), PublishError>;
}

/// Typed HTTP client for the external document store.
///
/// Reports live as pages inside a configured collection, one page per
/// metric. The page is found or created by title, and every publish replaces
/// the page's children with the freshly assembled blocks, so repeated syncs
/// do not accumulate duplicate changelogs.
#[derive(Clone)]
pub struct DocStoreClient {
    http: reqwest::Client,
    base_url: Url,
    token: String,
    collection_id: String,
}

impl DocStoreClient {
    /// Creates a new client bound to the provided base URL.
    pub fn new(base_url: &str, token: &str, collection_id: &str) -> Result<Self, PublishError> {
        let mut url = Url::parse(base_url).map_err(|err| PublishError::InvalidUrl {
            url: base_url.to_string(),
            source: err,
        })?;

        if !url.path().ends_with('/') {
            let mut path = url.path().trim_end_matches('/').to_string();
            path.push('/');
            url.set_path(&path);
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: url,
            token: token.to_string(),
            collection_id: collection_id.to_string(),
        })
    }

    /// Resolves the page holding the report for this metric, creating it on
    /// first publish.
    pub async fn find_or_create_page(&self, metric_name: &str) -> Result<String, PublishError> {
        if let Some(page_id) = self.find_page(metric_name).await? {
            return Ok(page_id);
        }
        self.create_page(metric_name).await
    }

    async fn find_page(&self, metric_name: &str) -> Result<Option<String>, PublishError> {
        let url = self.endpoint(&format!("collections/{}/query", self.collection_id))?;
        let body = json!({
            "filter": { "property": "title", "title": { "equals": metric_name } }
        });

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|err| PublishError::Http(err.to_string()))?;

        if !response.status().is_success() {
            return Err(PublishError::UnexpectedStatus {
                operation: "query pages",
                status: response.status(),
            });
        }

        let payload: PageQueryResponse = response
            .json()
            .await
            .map_err(|err| PublishError::Decode(err.to_string()))?;

        Ok(payload.results.into_iter().next().map(|page| page.id))
    }

    async fn create_page(&self, metric_name: &str) -> Result<String, PublishError> {
        let url = self.endpoint("pages")?;
        let body = json!({
            "parent": { "collection_id": self.collection_id },
            "properties": {
                "title": { "title": [ { "text": { "content": metric_name } } ] }
            }
        });

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|err| PublishError::Http(err.to_string()))?;

        if !response.status().is_success() {
            return Err(PublishError::UnexpectedStatus {
                operation: "create page",
                status: response.status(),
            });
        }

        let payload: PageRef = response
            .json()
            .await
            .map_err(|err| PublishError::Decode(err.to_string()))?;
        debug!(page = %payload.id, metric = metric_name, "report page created");

        Ok(payload.id)
    }

    async fn replace_children(&self, page_id: &str, blocks: &[Block]) -> Result<(), PublishError> {
        let url = self.endpoint(&format!("pages/{}/children", page_id))?;
        let body = json!({ "children": blocks });

        let response = self
            .http
            .put(url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|err| PublishError::Http(err.to_string()))?;

        if !response.status().is_success() {
            return Err(PublishError::UnexpectedStatus {
                operation: "replace page children",
                status: response.status(),
            });
        }

        Ok(())
    }

    fn endpoint(&self, path: &str) -> Result<Url, PublishError> {
        self.base_url
            .join(path)
            .map_err(|err| PublishError::InvalidUrl {
                url: format!("{}{}", self.base_url, path),
                source: err,
            })
    }
}

#[async_trait]
impl ReportPublisher for DocStoreClient {
    async fn publish(&self, metric_name: &str, blocks: &[Block]) -> Result<(), PublishError> {
        let page_id = self.find_or_create_page(metric_name).await?;
        debug!(page = %page_id, blocks = blocks.len(), "publishing report");
        self.replace_children(&page_id, blocks).await
    }
}

#[derive(Debug, Deserialize)]
struct PageQueryResponse {
    #[serde(default)]
    results: Vec<PageRef>,
}

#[derive(Debug, Deserialize)]
struct PageRef {
    id: String,
}

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("invalid document store url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("document store request failed: {0}")]
    Http(String),
    #[error("document store returned unexpected status {status} while trying to {operation}")]
    UnexpectedStatus {
        operation: &'static str,
        status: reqwest::StatusCode,
    },
    #[error("failed to decode document store response: {0}")]
    Decode(String),
}

impl From<PublishError> for DriftError {
    fn from(value: PublishError) -> Self {
        DriftError::PublishError(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_blocks() -> Vec<Block> {
        vec![Block::heading_1("Problem")]
    }

    async fn client_for(server: &MockServer) -> DocStoreClient {
        DocStoreClient::new(&format!("{}/v1", server.uri()), "secret", "col-1")
            .expect("valid base url")
    }

    #[tokio::test]
    async fn publishes_to_an_existing_page() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/collections/col-1/query"))
            .and(body_partial_json(json!({
                "filter": { "property": "title", "title": { "equals": "KPI of mrr" } }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [ { "id": "page-7" } ]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/v1/pages/page-7/children"))
            .and(body_partial_json(json!({
                "children": [ { "type": "heading_1" } ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client
            .publish("KPI of mrr", &sample_blocks())
            .await
            .expect("publish");
    }

    #[tokio::test]
    async fn creates_the_page_when_absent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/collections/col-1/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/pages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "page-new" })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/v1/pages/page-new/children"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client
            .publish("KPI of mrr", &sample_blocks())
            .await
            .expect("publish");
    }

    #[tokio::test]
    async fn store_failure_is_surfaced_with_context() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .publish("KPI of mrr", &sample_blocks())
            .await
            .expect_err("store is down");
        assert!(matches!(
            err,
            PublishError::UnexpectedStatus { operation: "query pages", status }
                if status.as_u16() == 503
        ));
    }
}
