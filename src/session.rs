use anyhow::Result;

use crate::agent::Agent;
use crate::prompt::{InputType, Prompt};

/// Interactive loop tying an [`Agent`] to a [`Prompt`]. Each turn finishes,
/// capability call included, before the next line is read.
pub struct Session<P: Prompt> {
    agent: Agent,
    prompt: P,
}

impl<P: Prompt> Session<P> {
    pub fn new(agent: Agent, prompt: P) -> Self {
        Self { agent, prompt }
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    pub fn start(&mut self) -> Result<()> {
        let greeting = self.agent.greet().to_string();
        self.prompt.ai_print(&greeting);

        loop {
            let input = self.prompt.get_user_input()?;
            let content = match (input.input_type, input.content) {
                (InputType::Exit, _) => break,
                (InputType::Message, Some(content)) => content,
                _ => continue,
            };

            self.prompt.show_busy();
            let outcome = self.agent.reply(&content);
            self.prompt.hide_busy();

            match outcome {
                Ok(outcome) => {
                    if let Some(text) = outcome.visible_text() {
                        self.prompt.ai_print(text);
                    }
                }
                Err(e) => tracing::error!(error = %format!("{:#}", e), "completion request failed"),
            }
        }

        self.prompt.close();
        Ok(())
    }
}
