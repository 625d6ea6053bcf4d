//! JSON Persistence

mod voice_registry;

pub use voice_registry::{JsonVoiceRegistry, REGISTRY_FILE};
