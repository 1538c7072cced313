pub mod codec;
pub mod errors;
pub mod http;
pub mod metrics;
pub mod models;
pub mod notifications;
pub mod session;
pub mod tasks;

pub use errors::AnalyzerError;
pub use models::{ AnalysisResult, CanonicalResult, FileHandle, OutputFormat, RawResponse };
pub use session::AnalysisSession;
