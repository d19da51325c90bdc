use crate::core::{Record, RecordSource, Result, Storage};
use crate::utils::error::ReportError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 後端資料來源設定:以顯式物件傳入,不依賴模組層級單例
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: String,
    pub headers: Option<HashMap<String, String>>,
    pub parameters: Option<HashMap<String, String>>,
    pub timeout_seconds: Option<u64>,
}

impl SourceConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            headers: None,
            parameters: None,
            timeout_seconds: None,
        }
    }
}

/// 透過 REST API 取得報表記錄
pub struct ApiSource {
    client: Client,
    config: SourceConfig,
}

impl ApiSource {
    pub fn new(config: SourceConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait::async_trait]
impl RecordSource for ApiSource {
    async fn fetch(&self) -> Result<Vec<Record>> {
        // 構建請求
        let mut request = self.client.get(&self.config.endpoint);

        if let Some(headers) = &self.config.headers {
            for (key, value) in headers {
                request = request.header(key, value);
            }
        }

        if let Some(params) = &self.config.parameters {
            for (key, value) in params {
                request = request.query(&[(key, value)]);
            }
        }

        if let Some(timeout) = self.config.timeout_seconds {
            request = request.timeout(std::time::Duration::from_secs(timeout));
        }

        tracing::debug!("📡 Fetching records from: {}", self.config.endpoint);
        let response = request.send().await?;
        tracing::debug!("📡 API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(ReportError::ProcessingError {
                message: format!("API request failed with status: {}", response.status()),
            });
        }

        let json_data: serde_json::Value = response.json().await?;
        let records = decode_records(json_data);
        tracing::info!("📡 Fetched {} records from API", records.len());
        Ok(records)
    }
}

/// 從本地 JSON 檔載入記錄(離線報表、測試夾具)
pub struct FileSource<S: Storage> {
    storage: S,
    path: String,
}

impl<S: Storage> FileSource<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage> RecordSource for FileSource<S> {
    async fn fetch(&self) -> Result<Vec<Record>> {
        let bytes = self.storage.read_file(&self.path).await?;
        let json_data: serde_json::Value = serde_json::from_slice(&bytes)?;
        let records = decode_records(json_data);
        tracing::info!("📂 Loaded {} records from {}", records.len(), self.path);
        Ok(records)
    }
}

/// JSON 陣列逐項轉成記錄;單一物件包成一筆;其他型別丟棄
pub fn decode_records(json_data: serde_json::Value) -> Vec<Record> {
    match json_data {
        serde_json::Value::Array(items) => items.into_iter().filter_map(Record::from_value).collect(),
        value @ serde_json::Value::Object(_) => Record::from_value(value).into_iter().collect(),
        other => {
            tracing::warn!("🔶 Unexpected API payload shape, ignoring: {}", other);
            Vec::new()
        }
    }
}
