use crate::core::roster::render_roster;
use crate::core::{AgentRequest, AttendeeRecord};
use serde_json::json;

pub const AGENT_NAME: &str = "workshop_matchmaker";
pub const AGENT_DESCRIPTION: &str = "Groups workshop attendees based on shared interests.";
pub const MAX_GROUP_SIZE: usize = 3;

// escaped so the trailing space after "teams" survives editors
pub const INSTRUCTION_PREAMBLE: &str = "You are a workshop matchmaker. Group students into teams \n\
based on their shared interests.\n\
\n\
RULES:\n\
- Create MULTIPLE groups\n\
- Each group should have MAXIMUM 3 people\n\
- Group people with similar interests together\n\
- Every attendee should be in at least one group\n\
\n\
Here is the data of all workshop attendees:\n\
\n";

pub const INSTRUCTION_CLOSING: &str =
    "\n\nCreate meaningful groups and explain why each group should connect.";

/// Embeds the rendered roster between the fixed instructions.
pub fn assemble_instruction(roster_text: &str) -> String {
    let mut instruction = String::with_capacity(
        INSTRUCTION_PREAMBLE.len() + roster_text.len() + INSTRUCTION_CLOSING.len(),
    );
    instruction.push_str(INSTRUCTION_PREAMBLE);
    instruction.push_str(roster_text);
    instruction.push_str(INSTRUCTION_CLOSING);
    instruction
}

/// Response schema for `GroupingResponse`, in the OpenAPI subset the model
/// endpoint accepts for structured output.
pub fn grouping_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "groups": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "members": {
                            "type": "ARRAY",
                            "items": { "type": "STRING" }
                        },
                        "description": { "type": "STRING" }
                    },
                    "required": ["members", "description"]
                }
            }
        },
        "required": ["groups"]
    })
}

pub struct PromptAssembler;

impl PromptAssembler {
    pub fn assemble(roster: &[AttendeeRecord], model: &str, message: &str) -> AgentRequest {
        let roster_text = render_roster(roster);
        tracing::debug!(
            "Rendered roster text: {} attendees, {} bytes",
            roster.len(),
            roster_text.len()
        );

        AgentRequest {
            name: AGENT_NAME.to_string(),
            description: AGENT_DESCRIPTION.to_string(),
            model: model.to_string(),
            instruction: assemble_instruction(&roster_text),
            message: message.to_string(),
            output_schema: grouping_schema(),
            attendee_names: roster.iter().map(|a| a.name.clone()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attendee(name: &str, email: &str) -> AttendeeRecord {
        AttendeeRecord {
            name: name.to_string(),
            email: email.to_string(),
            interests: "ML,robotics".to_string(),
            looking_to_connect_with: "other ML people".to_string(),
        }
    }

    #[test]
    fn test_instruction_wraps_roster_verbatim() {
        let roster = vec![attendee("Alice", "alice@x.com"), attendee("Bob", "bob@x.com")];
        let roster_text = render_roster(&roster);
        let instruction = assemble_instruction(&roster_text);

        assert!(instruction.starts_with(INSTRUCTION_PREAMBLE));
        assert!(instruction.ends_with(INSTRUCTION_CLOSING));
        let embedded = &instruction
            [INSTRUCTION_PREAMBLE.len()..instruction.len() - INSTRUCTION_CLOSING.len()];
        assert_eq!(embedded, roster_text);
    }

    #[test]
    fn test_preamble_matches_fixed_text() {
        let expected = [
            "You are a workshop matchmaker. Group students into teams ",
            "based on their shared interests.",
            "",
            "RULES:",
            "- Create MULTIPLE groups",
            "- Each group should have MAXIMUM 3 people",
            "- Group people with similar interests together",
            "- Every attendee should be in at least one group",
            "",
            "Here is the data of all workshop attendees:",
            "",
            "",
        ]
        .join("\n");
        assert_eq!(INSTRUCTION_PREAMBLE, expected);
        assert!(INSTRUCTION_PREAMBLE
            .lines()
            .next()
            .is_some_and(|line| line.ends_with("teams ")));
    }

    #[test]
    fn test_rules_mention_group_size() {
        assert!(INSTRUCTION_PREAMBLE
            .contains(&format!("MAXIMUM {} people", MAX_GROUP_SIZE)));
        assert!(INSTRUCTION_PREAMBLE.contains("Every attendee should be in at least one group"));
    }

    #[test]
    fn test_assemble_declares_schema_and_agent() {
        let roster = vec![attendee("Alice", "alice@x.com")];
        let request = PromptAssembler::assemble(&roster, "gemini-2.0-flash", "Group us");

        assert_eq!(request.name, "workshop_matchmaker");
        assert_eq!(request.model, "gemini-2.0-flash");
        assert_eq!(request.message, "Group us");
        assert_eq!(request.attendee_names, vec!["Alice"]);
        assert!(request.instruction.contains("- Alice (alice@x.com)"));

        let members = &request.output_schema["properties"]["groups"]["items"]["properties"]
            ["members"];
        assert_eq!(members["type"], "ARRAY");
        assert_eq!(request.output_schema["required"][0], "groups");
    }

    #[test]
    fn test_empty_roster_still_has_header() {
        let request = PromptAssembler::assemble(&[], "m", "go");
        assert!(request
            .instruction
            .contains("workshop attendees:\n\nWORKSHOP ATTENDEES:\n\n\n\nCreate meaningful groups"));
    }
}
