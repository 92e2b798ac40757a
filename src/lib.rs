//! A small conversational agent: it keeps the conversation, asks a language
//! model for the next reply, and when the model asks to call one of the
//! registered capabilities it parses and validates the call before running
//! it. An invalid argument turns into a question back to the user.

pub mod agent;
pub mod capabilities;
pub mod conversation;
pub mod errors;
pub mod models;
pub mod parser;
pub mod prompt;
pub mod providers;
pub mod session;
pub mod validator;
