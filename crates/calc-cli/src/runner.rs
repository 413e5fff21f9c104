//! Drives a calculator session from text tokens

use scientific_calculator::host::ScriptedPrompt;
use scientific_calculator::keypad::{token_to_actions, KeypadAction};
use scientific_calculator::session::Session;
use tracing::debug;

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::TerminalDisplay;
use crate::store::JsonFileStore;

/// A persisted calculator session fed by CLI tokens
#[derive(Debug)]
pub struct TokenRunner {
    session: Session<JsonFileStore, TerminalDisplay>,
}

impl TokenRunner {
    /// Opens the session, restoring state from the configured file
    pub fn open(config: &CliConfig) -> CliResult<Self> {
        let store = match &config.state {
            Some(path) => JsonFileStore::open(path).map_err(|e| CliError::state(path, e))?,
            None => JsonFileStore::ephemeral(),
        };
        Ok(Self {
            session: Session::open(config.engine.clone(), store, TerminalDisplay::new()),
        })
    }

    /// Presses every token in order
    ///
    /// A token may hold several whitespace-separated keys. After `pow` the
    /// next key is the exponent typed into the prompt, not a keypress. An
    /// unknown key stops the run before anything else is pressed.
    pub fn run<I, T>(&mut self, tokens: I) -> CliResult<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let keys: Vec<String> = tokens
            .into_iter()
            .flat_map(|t| {
                t.as_ref()
                    .split_whitespace()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect();

        let mut plan = Vec::with_capacity(keys.len());
        let mut keys = keys.into_iter();
        while let Some(key) = keys.next() {
            let actions = token_to_actions(&key).ok_or_else(|| CliError::unknown_token(&key))?;
            for action in actions {
                let answer = if action == KeypadAction::PowerPrompt {
                    keys.next()
                } else {
                    None
                };
                plan.push((action, answer));
            }
        }

        for (action, answer) in plan {
            let mut prompt = match answer {
                Some(text) => ScriptedPrompt::new().answer(&text),
                None => ScriptedPrompt::new(),
            };
            debug!(?action, "pressing");
            self.session.press(action, &mut prompt);
        }
        Ok(())
    }

    /// Forgets memory, history and angle mode, in memory and on disk
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// The rendered display
    #[must_use]
    pub fn display(&self) -> &TerminalDisplay {
        self.session.display()
    }

    /// Display snapshot as JSON
    pub fn view_json(&self) -> CliResult<String> {
        Ok(serde_json::to_string_pretty(&self.session.engine().view())?)
    }

    /// History as JSON, newest first
    pub fn history_json(&self) -> CliResult<String> {
        Ok(self.session.engine().history().to_json()?)
    }
}
