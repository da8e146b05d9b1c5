use crate::core::prompt::MAX_GROUP_SIZE;
use crate::core::{AgentRequest, GroupingResponse, Pipeline};
use crate::utils::error::Result;
use crate::utils::monitor::RunMonitor;

pub struct MatchmakerEngine<P: Pipeline> {
    pipeline: P,
    monitor: RunMonitor,
}

impl<P: Pipeline> MatchmakerEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: RunMonitor::new(monitor_enabled),
        }
    }

    /// Loads the roster and builds the agent request without calling the model.
    pub async fn prepare(&self) -> Result<AgentRequest> {
        let roster = self.pipeline.extract().await?;
        tracing::info!("Extracted {} attendees", roster.len());
        self.monitor.log_phase("Extract");

        let request = self.pipeline.assemble(roster).await?;
        self.monitor.log_phase("Assemble");
        Ok(request)
    }

    pub async fn run(&self) -> Result<GroupingResponse> {
        tracing::info!("Starting matchmaking run");

        let request = self.prepare().await?;
        let response = self.pipeline.invoke(&request).await?;
        self.monitor.log_phase("Invoke");

        review(&request, &response);
        self.monitor.log_final();
        Ok(response)
    }
}

/// Logs where the model ignored the grouping rules. The response is returned unchanged.
fn review(request: &AgentRequest, response: &GroupingResponse) {
    for group in response.oversized_groups(MAX_GROUP_SIZE) {
        tracing::warn!(
            "⚠️ Group of {} exceeds the maximum of {}: {}",
            group.members.len(),
            MAX_GROUP_SIZE,
            group.members.join(", ")
        );
    }

    let unassigned = response.unassigned(&request.attendee_names);
    if !unassigned.is_empty() {
        tracing::warn!(
            "⚠️ {} attendee(s) not placed in any group: {}",
            unassigned.len(),
            unassigned.join(", ")
        );
    }
}
