//! HTTP adapters for the outbound ports.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use shared_types::StoreValue;
use tracing::debug;

use crate::error::ClientError;
use crate::ports::{
    BulkDataSource, ContentStore, ContractResponse, Filetype, PriceSource, SafeGateway,
    SafeTxRequest, SafeTxState,
};
use crate::queries::{large_data_query, to_content};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

fn build_client() -> Result<Client, ClientError> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
        .map_err(ClientError::from)
}

/// Endpoint templates carry an `{api_key}` placeholder so keys stay out
/// of logged URLs until the request is actually made.
fn render_endpoint(template: &str, api_key: &str) -> String {
    template.replace("{api_key}", api_key)
}

/// Price oracle backed by a CoinGecko-style simple-price endpoint.
///
/// Expected response body: `{"autonolas":{"usd":1.31}}`.
pub struct HttpPriceSource {
    client: Client,
    url: String,
}

impl HttpPriceSource {
    pub fn new(endpoint_template: &str, api_key: &str) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_client()?,
            url: render_endpoint(endpoint_template, api_key),
        })
    }
}

#[async_trait]
impl PriceSource for HttpPriceSource {
    async fn fetch_price(&self) -> Result<f64, ClientError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }
        let body: Value = response
            .json()
            .await
            .map_err(|err| ClientError::Body(err.to_string()))?;
        body["autonolas"]["usd"]
            .as_f64()
            .ok_or_else(|| ClientError::Body(format!("no autonolas.usd in {body}")))
    }
}

/// Token-pair dataset fetched from a GraphQL subgraph.
pub struct HttpBulkDataSource {
    client: Client,
    url: String,
    page_size: usize,
}

impl HttpBulkDataSource {
    pub fn new(
        endpoint_template: &str,
        api_key: &str,
        page_size: usize,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_client()?,
            url: render_endpoint(endpoint_template, api_key),
            page_size,
        })
    }
}

#[async_trait]
impl BulkDataSource for HttpBulkDataSource {
    async fn fetch_dataset(&self) -> Result<StoreValue, ClientError> {
        let body = to_content(&large_data_query(self.page_size));
        let response = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }
        let dataset: Value = response
            .json()
            .await
            .map_err(|err| ClientError::Body(err.to_string()))?;
        if dataset.is_null() {
            return Err(ClientError::Body("null dataset response".to_owned()));
        }
        debug!(bytes = dataset.to_string().len(), "fetched dataset");
        Ok(dataset)
    }
}

/// Content-addressed store speaking a gateway's `add` endpoint: POST the
/// serialized object, get back `{"hash": "..."}`.
pub struct HttpContentStore {
    client: Client,
    url: String,
}

impl HttpContentStore {
    pub fn new(endpoint: &str) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_client()?,
            url: endpoint.to_owned(),
        })
    }
}

#[async_trait]
impl ContentStore for HttpContentStore {
    async fn store(&self, obj: &StoreValue, filetype: Filetype) -> Result<String, ClientError> {
        let content_type = match filetype {
            Filetype::Json => "application/json",
        };
        let response = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(obj.to_string())
            .send()
            .await
            .map_err(|err| ClientError::Storage(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Storage(format!("status code {status}")));
        }
        let body: Value = response
            .json()
            .await
            .map_err(|err| ClientError::Storage(err.to_string()))?;
        body["hash"]
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| ClientError::Storage("no hash in store response".to_owned()))
    }
}

/// Multisig gateway speaking a JSON contract API.
///
/// A 2xx response decodes to the `State` performative; any decodable
/// error body is surfaced as `Other` so the behaviour can log the
/// performative it got instead.
pub struct HttpSafeGateway {
    client: Client,
    url: String,
}

impl HttpSafeGateway {
    pub fn new(endpoint: &str) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_client()?,
            url: endpoint.to_owned(),
        })
    }
}

#[async_trait]
impl SafeGateway for HttpSafeGateway {
    async fn raw_tx_hash(&self, request: &SafeTxRequest) -> Result<ContractResponse, ClientError> {
        let body = serde_json::json!({
            "contract_address": request.contract_address,
            "to_address": request.to_address,
            "value": request.value,
            "data": format!("0x{}", hex::encode(&request.data)),
            "safe_tx_gas": request.safe_tx_gas,
            "chain_id": request.chain_id,
        });
        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|err| ClientError::Contract(err.to_string()))?;
        let status = response.status();
        let payload: Value = response
            .json()
            .await
            .map_err(|err| ClientError::Contract(err.to_string()))?;
        if !status.is_success() {
            return Ok(ContractResponse::Other(format!(
                "status {status}: {payload}"
            )));
        }
        match serde_json::from_value::<SafeTxState>(payload.clone()) {
            Ok(state) => Ok(ContractResponse::State(state)),
            Err(_) => Ok(ContractResponse::Other(payload.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_template_substitutes_the_key() {
        let url = render_endpoint("https://example.org/price?x_key={api_key}", "secret");
        assert_eq!(url, "https://example.org/price?x_key=secret");
    }

    #[test]
    fn test_clients_build() {
        assert!(HttpPriceSource::new("https://example.org/{api_key}", "k").is_ok());
        assert!(HttpBulkDataSource::new("https://example.org/{api_key}", "k", 100).is_ok());
        assert!(HttpContentStore::new("https://example.org/add").is_ok());
        assert!(HttpSafeGateway::new("https://example.org/safe").is_ok());
    }
}
