pub mod classification;
pub mod conservative;
pub mod extract;
pub mod llm;
pub mod prompts;

pub use classification::{ClassificationError, ClassificationService};
pub use conservative::RiskKeywordSet;
pub use llm::{OpenRouterClient, VisionModel};
