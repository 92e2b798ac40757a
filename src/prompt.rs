use anyhow::Result;
use bat::WrappingMode;
use cliclack::{input, spinner, ProgressBar};
use console::style;
use std::io::{self, ErrorKind, Write};

/// Words that end the session
const EXIT_COMMANDS: [&str; 3] = ["quit", "q", "exit"];

/// Terminal side of a session: reads what the user types and shows replies
pub trait Prompt {
    fn get_user_input(&mut self) -> Result<Input>;
    fn ai_print(&mut self, text: &str);
    fn show_busy(&mut self) {}
    fn hide_busy(&mut self) {}
    fn close(&mut self) {}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Input {
    pub input_type: InputType,
    pub content: Option<String>, // only set for messages
}

impl Input {
    pub fn message<S: Into<String>>(content: S) -> Self {
        Self {
            input_type: InputType::Message,
            content: Some(content.into()),
        }
    }

    pub fn exit() -> Self {
        Self {
            input_type: InputType::Exit,
            content: None,
        }
    }

    pub fn ask_again() -> Self {
        Self {
            input_type: InputType::AskAgain,
            content: None,
        }
    }

    /// Classify a line typed by the user
    pub fn from_line(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            Self::ask_again()
        } else if EXIT_COMMANDS.iter().any(|c| line.eq_ignore_ascii_case(c)) {
            Self::exit()
        } else {
            Self::message(line)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    AskAgain, // Nothing usable was typed
    Message,  // User sent a message
    Exit,     // User wants to exit the session
}

pub struct CliclackPrompt {
    bot_name: String,
    spinner: Option<ProgressBar>,
}

impl CliclackPrompt {
    pub fn new<S: Into<String>>(bot_name: S) -> Self {
        Self {
            bot_name: bot_name.into(),
            spinner: None,
        }
    }
}

fn print_markdown(content: &str) -> bool {
    bat::PrettyPrinter::new()
        .input(bat::Input::from_bytes(content.as_bytes()))
        .language("Markdown")
        .wrapping_mode(WrappingMode::Character)
        .print()
        .unwrap_or(false)
}

impl Prompt for CliclackPrompt {
    fn get_user_input(&mut self) -> Result<Input> {
        let line: String = match input("You:").placeholder("").interact() {
            Ok(line) => line,
            Err(e) if e.kind() == ErrorKind::Interrupted => return Ok(Input::exit()),
            Err(e) => return Err(e.into()),
        };
        Ok(Input::from_line(&line))
    }

    fn ai_print(&mut self, text: &str) {
        println!("{}", style(format!("{}:", self.bot_name)).cyan().bold());
        if !print_markdown(text) {
            println!("{}", text);
        }
        println!();
        let _ = io::stdout().flush();
    }

    fn show_busy(&mut self) {
        let busy = spinner();
        busy.start("awaiting reply");
        self.spinner = Some(busy);
    }

    fn hide_busy(&mut self) {
        if let Some(busy) = self.spinner.take() {
            busy.stop("");
        }
    }

    fn close(&mut self) {
        self.hide_busy();
        println!("{}", style("Goodbye!").dim());
    }
}
