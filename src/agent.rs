use anyhow::Result;

use crate::capabilities::{Capability, CapabilityRegistry, ChangeTimezone, SendEmail};
use crate::conversation::ConversationHistory;
use crate::errors::{ArgumentError, CapabilityError, CapabilityResult};
use crate::models::intent::CallIntent;
use crate::models::message::Message;
use crate::parser::parse;
use crate::providers::base::Provider;
use crate::validator::validate_arguments;

pub const DEFAULT_BOT_NAME: &str = "SuperBoringBot";
pub const GREETING: &str = "Hello! How can I assist you today?";

const SYSTEM_PROMPT: &str = "You are {bot_name}, a friendly assistant that helps users get things done.
You can perform actions for the user by calling the functions you are given.
Only call a function when the user clearly asks for what it does.
Never guess or invent a value for a function argument. When you do not know a value, ask the user for it.
When no function fits, answer the user directly and briefly.";

/// How a single user turn ended
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// The model's text, or a capability's confirmation, was appended to history
    Replied(String),
    /// A supplied argument was invalid; the user was asked to provide it
    RepairRequested { field: String, message: String },
    /// The call could not be carried out. Nothing was appended to history.
    Failed(CapabilityError),
}

impl TurnOutcome {
    /// Text to show the user, if the turn produced any
    pub fn visible_text(&self) -> Option<&str> {
        match self {
            TurnOutcome::Replied(text) => Some(text),
            TurnOutcome::RepairRequested { message, .. } => Some(message),
            TurnOutcome::Failed(_) => None,
        }
    }
}

/// The assistant message asking the user to supply a field
pub fn repair_message(description: &str) -> String {
    format!(
        "Great! In order to continue, you need to provide: {}",
        description
    )
}

/// Agent owns a conversation and the capabilities the model may call, and
/// turns each model reply into either text or a validated capability call
pub struct Agent {
    name: String,
    provider: Box<dyn Provider>,
    registry: CapabilityRegistry,
    history: ConversationHistory,
}

impl Agent {
    /// Create an agent with no capabilities
    pub fn new<S: Into<String>>(name: S, provider: Box<dyn Provider>) -> Self {
        Self {
            name: name.into(),
            provider,
            registry: CapabilityRegistry::new(),
            history: ConversationHistory::new(),
        }
    }

    /// Create an agent with the built-in capabilities registered
    pub fn init<S: Into<String>>(name: S, provider: Box<dyn Provider>) -> Self {
        let mut agent = Self::new(name, provider);
        agent.add_capability(ChangeTimezone::new());
        agent.add_capability(SendEmail::new());
        agent
    }

    pub fn add_capability<C>(&mut self, capability: C)
    where
        C: Capability + 'static,
    {
        self.registry.register(capability);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    /// The system message sent ahead of the history on every request. It is
    /// not part of the history itself.
    pub fn system_message(&self) -> Message {
        Message::system(SYSTEM_PROMPT.replace("{bot_name}", &self.name))
    }

    /// Open the conversation with the greeting
    pub fn greet(&mut self) -> &str {
        &self.history.add_assistant_message(GREETING).content
    }

    /// Run one user turn: record the message, ask the model, and act on its answer.
    ///
    /// Errors from the completion service are returned. Failures of the
    /// requested capability call are not; they end the turn as
    /// [`TurnOutcome::Failed`].
    pub fn reply(&mut self, user_text: &str) -> Result<TurnOutcome> {
        self.history.add_user_message(user_text);

        let mut messages = Vec::with_capacity(self.history.len() + 1);
        messages.push(self.system_message());
        messages.extend_from_slice(self.history.messages());

        let (completion, usage) = self
            .provider
            .complete(&messages, &self.registry.specs())?;
        tracing::debug!(
            input_tokens = ?usage.input_tokens,
            output_tokens = ?usage.output_tokens,
            total_tokens = ?usage.total_tokens,
            "completion received"
        );

        let outcome = match completion.call_intent {
            None => {
                self.history.add_assistant_message(&completion.text);
                TurnOutcome::Replied(completion.text)
            }
            Some(intent) => self.handle_call_intent(&intent),
        };
        Ok(outcome)
    }

    fn handle_call_intent(&mut self, intent: &CallIntent) -> TurnOutcome {
        match self.dispatch(intent) {
            Ok(text) => {
                self.history.add_assistant_message(&text);
                TurnOutcome::Replied(text)
            }
            Err(CapabilityError::InvalidArguments(ArgumentError::InvalidField {
                field,
                description,
            })) => {
                tracing::info!(capability = %intent.name, %field, "asking user for invalid field");
                let message = repair_message(&description);
                self.history.add_assistant_message(&message);
                TurnOutcome::RepairRequested { field, message }
            }
            Err(err) => {
                tracing::warn!(
                    capability = %intent.name,
                    arguments = ?intent.arguments,
                    error = %err,
                    "capability call failed"
                );
                TurnOutcome::Failed(err)
            }
        }
    }

    fn dispatch(&self, intent: &CallIntent) -> CapabilityResult<String> {
        let (name, args) = parse(&self.registry, intent)?;
        validate_arguments(&self.registry, &name, &args)?;

        let capability = self.registry.get(&name)?;
        tracing::info!(capability = %name, "invoking capability");
        capability
            .invoke(&args)
            .map_err(|e| CapabilityError::HandlerFailure(format!("{}: {:#}", name, e)))
    }
}
