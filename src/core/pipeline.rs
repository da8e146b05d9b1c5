pub use crate::app::pipelines::matchmaker_pipeline::MatchmakerPipeline;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::MatchmakerEngine;
    use crate::core::prompt::{INSTRUCTION_CLOSING, INSTRUCTION_PREAMBLE};
    use crate::core::{
        AgentRequest, ConfigProvider, GroupSuggestion, GroupingResponse, ModelInvoker, Pipeline,
        Storage,
    };
    use crate::utils::error::{MatchmakerError, Result};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: HashMap<String, Vec<u8>>,
    }

    impl MockStorage {
        fn with_file(path: &str, content: &str) -> Self {
            let mut files = HashMap::new();
            files.insert(path.to_string(), content.as_bytes().to_vec());
            Self { files }
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.files.get(path).cloned().ok_or_else(|| {
                MatchmakerError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }
    }

    struct MockConfig {
        roster_path: String,
    }

    impl ConfigProvider for MockConfig {
        fn roster_path(&self) -> &str {
            &self.roster_path
        }

        fn model(&self) -> &str {
            "mock-model"
        }

        fn message(&self) -> &str {
            "Please group the workshop attendees."
        }
    }

    /// Records every request and answers with a fixed grouping.
    #[derive(Clone, Default)]
    struct MockModel {
        seen: Arc<Mutex<Vec<AgentRequest>>>,
        response: GroupingResponse,
    }

    impl ModelInvoker for MockModel {
        async fn generate(&self, request: &AgentRequest) -> Result<GroupingResponse> {
            self.seen.lock().await.push(request.clone());
            Ok(self.response.clone())
        }
    }

    const ROSTER: &str = "name,email,interests,looking_to_connect_with\n\
Alice,alice@x.com,\"ML,robotics\",\"other ML people\"\n\
Bob,bob@x.com,\"design,robotics\",\"engineers\"\n";

    fn pipeline(
        storage: MockStorage,
        model: MockModel,
    ) -> MatchmakerPipeline<MockStorage, MockConfig, MockModel> {
        MatchmakerPipeline::new(
            storage,
            MockConfig {
                roster_path: "students.csv".to_string(),
            },
            model,
        )
    }

    #[tokio::test]
    async fn test_extract_reads_roster_through_storage() {
        let p = pipeline(MockStorage::with_file("students.csv", ROSTER), MockModel::default());
        let roster = p.extract().await.unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[1].email, "bob@x.com");
    }

    #[tokio::test]
    async fn test_missing_roster_is_io_error() {
        let p = pipeline(MockStorage::default(), MockModel::default());
        assert!(matches!(
            p.extract().await,
            Err(MatchmakerError::IoError(_))
        ));
    }

    #[tokio::test]
    async fn test_engine_sends_assembled_prompt_once() {
        let model = MockModel {
            response: GroupingResponse {
                groups: vec![GroupSuggestion {
                    members: vec!["Alice".to_string(), "Bob".to_string()],
                    description: "Both work on robotics".to_string(),
                }],
            },
            ..Default::default()
        };
        let seen = model.seen.clone();
        let engine = MatchmakerEngine::new(pipeline(
            MockStorage::with_file("students.csv", ROSTER),
            model,
        ));

        let response = engine.run().await.unwrap();
        assert_eq!(response.groups[0].members, vec!["Alice", "Bob"]);

        let seen = seen.lock().await;
        assert_eq!(seen.len(), 1);
        let instruction = &seen[0].instruction;
        assert!(instruction.starts_with(INSTRUCTION_PREAMBLE));
        assert!(instruction.ends_with(INSTRUCTION_CLOSING));
        assert!(instruction.contains(
            "- Alice (alice@x.com)\n  Interests: ML,robotics\n  Looking to connect with: other ML people\n"
        ));
        assert!(instruction.contains(
            "- Bob (bob@x.com)\n  Interests: design,robotics\n  Looking to connect with: engineers\n"
        ));
        assert_eq!(seen[0].model, "mock-model");
    }

    #[tokio::test]
    async fn test_prepare_does_not_call_model() {
        let model = MockModel::default();
        let seen = model.seen.clone();
        let engine = MatchmakerEngine::new(pipeline(
            MockStorage::with_file("students.csv", ROSTER),
            model,
        ));

        let request = engine.prepare().await.unwrap();
        assert_eq!(request.attendee_names, vec!["Alice", "Bob"]);
        assert!(seen.lock().await.is_empty());
    }
}
