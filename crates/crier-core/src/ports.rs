//! Port definitions for Hexagonal Architecture
//!
//! These traits define the boundaries between the core domain and external adapters.

pub mod content;
pub mod history;
pub mod image;
pub mod publish;

pub use content::ContentGeneratorPort;
pub use history::HistoryStorePort;
pub use image::ImageGeneratorPort;
pub use publish::{Platform, PublisherPort};
