//! Queries - CQRS 查询定义

pub mod handlers;
mod voice_queries;

pub use voice_queries::ListVoices;
