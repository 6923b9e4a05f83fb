// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{RawProfile, Profile, MeetupContext, GenerationRequest, IcebreakerResult};
pub use requests::IcebreakerRequest;
pub use responses::{HealthResponse, ErrorResponse};
