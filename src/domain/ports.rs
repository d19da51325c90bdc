use crate::domain::model::{FilterState, Record};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Record>>;
}

/// Exporters receive the filtered and sorted sequence, never the raw one,
/// so exported documents match what the table displays.
#[async_trait]
pub trait Exporter: Send + Sync {
    async fn export(&self, rows: &[Record], filters: &FilterState) -> Result<String>;
}
