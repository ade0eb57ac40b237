// Async HTTP client for the item service.
//
// Base path: {base_url}/items/
// Bodies: JSON in both directions; errors carry a FastAPI-style `detail`.

use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::{DeleteReceipt, ItemPatchPayload, ItemPayload, ItemRecord};

const PREVIEW_CHARS: usize = 200;

// ── Error response shape ─────────────────────────────────────────────

/// `{"detail": "..."}` for handled errors, `{"detail": [{"msg": ...}]}` for
/// request validation failures, `{"message": "..."}` from other backends.
#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    detail: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
}

impl ErrorResponse {
    fn into_message(self) -> Option<String> {
        let from_detail = match self.detail {
            Some(serde_json::Value::String(s)) => Some(s),
            Some(serde_json::Value::Array(entries)) => entries
                .first()
                .and_then(|e| e.get("msg"))
                .and_then(|m| m.as_str())
                .map(String::from),
            _ => None,
        };
        from_detail.or(self.message).filter(|m| !m.is_empty())
    }
}

#[derive(serde::Deserialize)]
struct Welcome {
    #[serde(default)]
    message: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the item service.
///
/// Each method is a single request; nothing is cached or retried.
pub struct ItemsClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ItemsClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL and transport config.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
        })
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
        })
    }

    /// The service base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// `GET /items/`
    pub async fn list_items(&self) -> Result<Vec<ItemRecord>, Error> {
        let url = self.collection_url()?;
        debug!("GET {url}");
        let resp = self.http.get(url).send().await?;
        handle_response(resp).await
    }

    /// `GET /items/{id}`
    pub async fn get_item(&self, id: &str) -> Result<ItemRecord, Error> {
        let url = self.item_url(id)?;
        debug!("GET {url}");
        let resp = self.http.get(url).send().await?;
        handle_response(resp).await
    }

    /// `POST /items/`
    pub async fn create_item(&self, body: &ItemPayload) -> Result<ItemRecord, Error> {
        let url = self.collection_url()?;
        self.send_json(reqwest::Method::POST, url, body).await
    }

    /// `PUT /items/{id}`
    pub async fn update_item(
        &self,
        id: &str,
        body: &ItemPatchPayload,
    ) -> Result<ItemRecord, Error> {
        let url = self.item_url(id)?;
        self.send_json(reqwest::Method::PUT, url, body).await
    }

    /// `DELETE /items/{id}`
    pub async fn delete_item(&self, id: &str) -> Result<DeleteReceipt, Error> {
        let url = self.item_url(id)?;
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(parse_error(status, resp).await);
        }
        let body = resp.text().await?;
        Ok(DeleteReceipt::from_body(&body))
    }

    /// `GET /` -- the service's welcome message. Useful as a reachability probe.
    pub async fn service_info(&self) -> Result<Option<String>, Error> {
        let url = self.base_url.clone();
        debug!("GET {url}");
        let resp = self.http.get(url).send().await?;
        let welcome: Welcome = handle_response(resp).await?;
        Ok(welcome.message)
    }

    // ── URL builders ─────────────────────────────────────────────────

    fn collection_url(&self) -> Result<Url, Error> {
        Ok(self.base_url.join("items/")?)
    }

    /// `{base}/items/{id}` with `id` percent-encoded as a single segment.
    fn item_url(&self, id: &str) -> Result<Url, Error> {
        let mut url = self.collection_url()?;
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    async fn send_json<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        method: reqwest::Method,
        url: Url,
        body: &B,
    ) -> Result<T, Error> {
        debug!("{method} {url}");
        let resp = self.http.request(method, url).json(body).send().await?;
        handle_response(resp).await
    }
}

/// Ensure the base URL is absolute and ends with `/` so `join` appends.
fn normalize_base_url(raw: &str) -> Result<Url, Error> {
    let mut url = Url::parse(raw)?;
    if url.cannot_be_a_base() {
        return Err(Error::InvalidUrl(
            url::ParseError::RelativeUrlWithCannotBeABaseBase,
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    if !status.is_success() {
        return Err(parse_error(status, resp).await);
    }

    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        let preview: String = body.chars().take(PREVIEW_CHARS).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body,
        }
    })
}

async fn parse_error(status: StatusCode, resp: reqwest::Response) -> Error {
    let raw = resp.text().await.unwrap_or_default();

    let message = match serde_json::from_str::<ErrorResponse>(&raw) {
        Ok(parsed) => parsed.into_message(),
        Err(_) => {
            let trimmed = raw.trim();
            (!trimmed.is_empty()).then(|| trimmed.chars().take(PREVIEW_CHARS).collect())
        }
    };
    debug!(status = status.as_u16(), ?message, "item service returned an error");

    Error::Api {
        status: status.as_u16(),
        message,
    }
}
