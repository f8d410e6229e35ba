use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

pub type ClientResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Fields left as `None` are not sent and stay unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

pub struct ItemsClient {
    client: Client,
    base_url: String,
}

impl ItemsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn items_url(&self) -> String {
        format!("{}/api/items", self.base_url)
    }

    fn item_url(&self, id: u64) -> String {
        format!("{}/api/items/{}", self.base_url, id)
    }

    /// List every item in insertion order.
    pub async fn list_items(&self) -> ClientResult<Vec<Item>> {
        let resp = self.client.get(self.items_url()).send().await?;
        Ok(expect_success(resp).await?.json().await?)
    }

    /// Fetch one item; `None` when the id is unknown.
    pub async fn get_item(&self, id: u64) -> ClientResult<Option<Item>> {
        let resp = self.client.get(self.item_url(id)).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(expect_success(resp).await?.json().await?))
    }

    /// Create an item. Fails when name or description is empty.
    pub async fn create_item(&self, item: &NewItem) -> ClientResult<Item> {
        let resp = self.client.post(self.items_url()).json(item).send().await?;
        Ok(expect_success(resp).await?.json().await?)
    }

    /// Apply a partial update; `None` when the id is unknown.
    pub async fn update_item(&self, id: u64, update: &ItemUpdate) -> ClientResult<Option<Item>> {
        let resp = self.client.put(self.item_url(id)).json(update).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(expect_success(resp).await?.json().await?))
    }

    /// Delete an item; `false` when the id is unknown.
    pub async fn delete_item(&self, id: u64) -> ClientResult<bool> {
        let resp = self.client.delete(self.item_url(id)).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        expect_success(resp).await?;
        Ok(true)
    }
}

async fn expect_success(resp: Response) -> ClientResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let text = resp.text().await?;
    Err(format!("Item service returned error status {}: {}", status, text).into())
}
