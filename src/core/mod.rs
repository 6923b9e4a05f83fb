// Core pipeline exports
pub mod assembler;
pub mod extractor;
pub mod profile;
pub mod prompt;

pub use assembler::{IcebreakerAssembler, DEFAULT_MAX_NEW_TOKENS};
pub use extractor::{extract_icebreakers, fallback_record};
pub use profile::{common_interests, normalize_profile};
pub use prompt::build_prompt;
