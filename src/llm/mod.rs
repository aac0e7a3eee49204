pub mod huggingface;

pub use huggingface::{DEFAULT_ENDPOINT, HuggingFaceClient, SummaryOutcome};
