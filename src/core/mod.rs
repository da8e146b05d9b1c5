pub mod engine;
pub mod pipeline;
pub mod prompt;
pub mod roster;

pub use crate::domain::model::{AgentRequest, AttendeeRecord, GroupSuggestion, GroupingResponse};
pub use crate::domain::ports::{ConfigProvider, ModelInvoker, Pipeline, Storage};
pub use crate::utils::error::Result;
