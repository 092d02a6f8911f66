//! Randimg - procedural random image generation.
//!
//! The core turns raw `key:value` tokens (or page form state) into a
//! validated [`Configuration`], then drives a lazy [`Generation`] that asks a
//! [`GeneratorCatalog`] for strategies and draws one surface per image.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod configuration;
pub mod context;
pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod output;
pub mod page;
pub mod ports;
pub mod resolver;

pub use configuration::{ConfigOverrides, Configuration, ImageFormat};
pub use error::{GenerationError, ImageError, ValidationError};
pub use orchestrator::{generate, GeneratedImage, Generation};
pub use ports::{GeneratorCatalog, RandomSource, Strategy};
pub use resolver::{resolve, resolve_arguments};
