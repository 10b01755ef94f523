use crate::error::Result;
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::collections::VecDeque;

/// Source of yes/no answers for deletion gates.
pub trait Prompter {
    fn confirm(&mut self, message: &str) -> Result<bool>;
}

/// Asks on the terminal. The default answer is no.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, message: &str) -> Result<bool> {
        let answer = Confirm::with_theme(&self.theme)
            .with_prompt(message)
            .default(false)
            .interact()?;
        Ok(answer)
    }
}

/// Replays canned answers and records every question asked. Answers
/// "no" once the script runs out.
#[derive(Debug, Default, Clone)]
pub struct ScriptedPrompter {
    answers: VecDeque<bool>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, message: &str) -> Result<bool> {
        self.asked.push(message.to_string());
        Ok(self.answers.pop_front().unwrap_or(false))
    }
}
