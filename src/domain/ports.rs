use crate::domain::model::{AgentRequest, AttendeeRecord, GroupingResponse};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn roster_path(&self) -> &str;
    fn model(&self) -> &str;
    fn message(&self) -> &str;
}

/// The hosted model that turns an [`AgentRequest`] into groups.
pub trait ModelInvoker: Send + Sync {
    fn generate(
        &self,
        request: &AgentRequest,
    ) -> impl std::future::Future<Output = Result<GroupingResponse>> + Send;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<AttendeeRecord>>;
    async fn assemble(&self, roster: Vec<AttendeeRecord>) -> Result<AgentRequest>;
    async fn invoke(&self, request: &AgentRequest) -> Result<GroupingResponse>;
}
