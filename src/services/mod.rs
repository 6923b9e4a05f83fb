// Service exports
pub mod generator;
pub mod http;
pub mod template;

pub use generator::{GenerationFailure, TextGenerator, from_settings};
pub use http::{HttpGenerator, SamplingParams};
pub use template::TemplateGenerator;
