//! AI adapter implementations
//!
//! Contains the OpenAI chat and DALL-E image adapters implementing the
//! ContentGeneratorPort and ImageGeneratorPort traits.

mod dalle;
mod openai;

pub use dalle::{DalleAdapter, DEFAULT_IMAGE_MODEL};
pub use openai::{OpenAiAdapter, DEFAULT_TEXT_MODEL};
