use serde::{Deserialize, Serialize};

/// One row of the roster file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendeeRecord {
    pub name: String,
    pub email: String,
    pub interests: String,
    pub looking_to_connect_with: String,
}

/// Everything the model collaborator needs to run the matchmaking agent once.
#[derive(Debug, Clone, Serialize)]
pub struct AgentRequest {
    pub name: String,
    pub description: String,
    pub model: String,
    /// Static instructions with the rendered roster embedded.
    pub instruction: String,
    /// User turn that triggers the agent.
    pub message: String,
    pub output_schema: serde_json::Value,
    #[serde(skip)]
    pub attendee_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSuggestion {
    pub members: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GroupingResponse {
    pub groups: Vec<GroupSuggestion>,
}

impl GroupingResponse {
    /// Groups with more members than `max_size`.
    pub fn oversized_groups(&self, max_size: usize) -> Vec<&GroupSuggestion> {
        self.groups
            .iter()
            .filter(|g| g.members.len() > max_size)
            .collect()
    }

    /// Names from `attendees` that no group mentions, in roster order.
    pub fn unassigned<'a>(&self, attendees: &'a [String]) -> Vec<&'a str> {
        attendees
            .iter()
            .filter(|name| {
                !self
                    .groups
                    .iter()
                    .any(|g| g.members.iter().any(|m| m.trim() == name.trim()))
            })
            .map(String::as_str)
            .collect()
    }
}
