//! LLM Service Module
//!
//! Chat-completion access for name generation.
//!
//! # Architecture
//! ```text
//! ┌──────────────────┐
//! │ CompletionClient │  ← Trait (generic interface)
//! └────────┬─────────┘
//!          │
//!    ┌─────┴──────┐
//!    ▼            ▼
//! ┌────────┐  ┌──────────┐
//! │OpenAI  │  │ Test     │
//! │Compat. │  │ stubs    │
//! └────────┘  └──────────┘
//! ```

mod client;
mod models;

pub use client::{CompletionClient, OpenAICompatibleClient};
pub use models::*;
