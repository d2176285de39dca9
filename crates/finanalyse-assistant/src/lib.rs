//! Conversational AI overlay for the FinAnalyse backend
//!
//! Wraps the Google Generative Language (Gemini) REST API behind a small
//! client, adds the FinAnalyse tutor persona, and keeps per-session chat
//! history in an injected store with TTL and capacity eviction. Sessions
//! are ephemeral and process-lifetime only; there is no durability.

pub mod assistant;
pub mod error;
pub mod gemini;
pub mod messages;
pub mod session;

pub use assistant::{CompanyFigures, FinanceAssistant};
pub use error::{AssistantError, Result};
pub use gemini::GeminiClient;
pub use messages::{ChatRole, ChatTurn};
pub use session::{ChatSession, InMemorySessionStore, SessionStore};
