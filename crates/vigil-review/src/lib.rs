//! Review requesting: LLM client, prompt construction, and the requester
//! that turns a collected diff into a printable review result.

pub mod llm;
pub mod prompt;
pub mod requester;

pub use requester::{ReviewOutcome, ReviewRequester};
