//! External service adapters for the Lumina stylist.

pub mod gemini_api_agent;

pub use gemini_api_agent::GeminiApiAgent;
