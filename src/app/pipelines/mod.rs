pub mod matchmaker_pipeline;
