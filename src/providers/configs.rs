pub mod base;
pub mod openai;

pub use base::ProviderConfig;
pub use openai::OpenAiProviderConfig;
