//! amora — voice-chat gateway library
//!
//! Relays chat messages to a generative-language API with short-lived
//! per-session memory, normalizes replies for speech, and fronts a
//! speech-synthesis API. HTTP surface in [`server`].

pub mod chat;
pub mod config;
pub mod gemini;
pub mod memory;
pub mod server;
pub mod speech;
