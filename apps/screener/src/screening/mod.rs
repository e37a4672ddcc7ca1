// Resume screening pipeline.
// Implements: prompt building, analysis requests, report decoding and the batch run.
// All LLM calls go through llm_client.

pub mod analyzer;
pub mod batch;
pub mod prompts;
pub mod report;
