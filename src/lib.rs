//! Campus Icebreaker - icebreaker generation service for CampusLink meetups
//!
//! This library builds a prompt from two student profiles, asks a text
//! generator for a continuation and recovers a strict icebreaker (two
//! conversation starters, an activity and a shared topic) from whatever
//! the generator returned.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{IcebreakerAssembler, extract_icebreakers, normalize_profile, common_interests, build_prompt};
pub use models::{RawProfile, Profile, MeetupContext, GenerationRequest, IcebreakerResult, IcebreakerRequest};
pub use services::{GenerationFailure, TextGenerator, HttpGenerator, TemplateGenerator};
