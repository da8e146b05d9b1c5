use crate::core::prompt::PromptAssembler;
use crate::core::roster::load_roster;
use crate::core::{
    AgentRequest, AttendeeRecord, ConfigProvider, GroupingResponse, ModelInvoker, Pipeline,
    Storage,
};
use crate::utils::error::Result;

/// Roster file → prompt → model, wired through the storage, config and model ports.
pub struct MatchmakerPipeline<S: Storage, C: ConfigProvider, M: ModelInvoker> {
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) model: M,
}

impl<S: Storage, C: ConfigProvider, M: ModelInvoker> MatchmakerPipeline<S, C, M> {
    pub fn new(storage: S, config: C, model: M) -> Self {
        Self {
            storage,
            config,
            model,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, M: ModelInvoker> Pipeline for MatchmakerPipeline<S, C, M> {
    async fn extract(&self) -> Result<Vec<AttendeeRecord>> {
        tracing::info!("🚀 Loading roster: {}", self.config.roster_path());
        load_roster(&self.storage, self.config.roster_path()).await
    }

    async fn assemble(&self, roster: Vec<AttendeeRecord>) -> Result<AgentRequest> {
        tracing::info!("🔧 Assembling prompt for {} attendees", roster.len());
        let request =
            PromptAssembler::assemble(&roster, self.config.model(), self.config.message());
        tracing::debug!("Prompt is {} bytes", request.instruction.len());
        Ok(request)
    }

    async fn invoke(&self, request: &AgentRequest) -> Result<GroupingResponse> {
        tracing::info!("📨 Sending prompt to model {}", request.model);
        self.model.generate(request).await
    }
}
