//! Concrete provider clients.

mod gemini;
mod zhipu;

pub use gemini::GeminiClient;
pub use zhipu::ZhipuClient;

/// Provider id of the Zhipu GLM client (primary tier).
pub const ZHIPU: &str = "zhipu";
/// Provider id of the Gemini client (fallback tier).
pub const GEMINI: &str = "gemini";
