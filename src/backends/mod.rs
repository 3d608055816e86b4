//! HTTP implementations of the generation capability.

pub mod openai_compatible;

pub use openai_compatible::{OpenAICompatible, OpenAICompatibleConfig};
