// Strategy generation: prompt assembly, compliance scan, response parsing, pipeline.
// All model calls go through llm_client; all web searches through search.

pub mod compliance;
pub mod generator;
pub mod handlers;
pub mod platform;
pub mod prompt_builder;
pub mod prompts;
pub mod response_parser;
pub mod tone;
