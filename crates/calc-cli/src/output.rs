//! Terminal rendering of the calculator display

use console::style;
use scientific_calculator::core::history::History;
use scientific_calculator::host::{DisplaySlot, DisplaySurface};

/// Display slots captured for printing
///
/// Colors follow `console`'s terminal detection, so piped output is plain.
#[derive(Debug, Clone, Default)]
pub struct TerminalDisplay {
    main: String,
    expression: String,
    error: String,
    memory: String,
    angle_mode: String,
    history: Vec<String>,
}

impl TerminalDisplay {
    /// Creates an empty display
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Main display text
    #[must_use]
    pub fn main(&self) -> &str {
        &self.main
    }

    /// Error message, empty when none is showing
    #[must_use]
    pub fn error(&self) -> &str {
        &self.error
    }

    /// History lines as last rendered, newest first
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Full display: expression line, main value, error, indicators
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        if !self.expression.is_empty() {
            out.push_str(&format!("{}\n", style(&self.expression).dim()));
        }
        out.push_str(&format!("{}\n", style(&self.main).bold()));
        if !self.error.is_empty() {
            out.push_str(&format!("{}\n", style(&self.error).red()));
        }
        let indicators = [self.memory.as_str(), self.angle_mode.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&format!("{}\n", style(indicators).cyan()));
        out
    }

    /// Numbered history listing
    #[must_use]
    pub fn render_history(&self) -> String {
        if self.history.is_empty() {
            return format!("{}\n", style("(empty history)").dim());
        }
        self.history
            .iter()
            .enumerate()
            .map(|(i, line)| format!("{} {line}\n", style(format!("h{i}")).dim()))
            .collect()
    }
}

impl DisplaySurface for TerminalDisplay {
    fn set_text(&mut self, slot: DisplaySlot, text: &str) {
        let target = match slot {
            DisplaySlot::Main => &mut self.main,
            DisplaySlot::Expression => &mut self.expression,
            DisplaySlot::Error => &mut self.error,
            DisplaySlot::Memory => &mut self.memory,
            DisplaySlot::AngleMode => &mut self.angle_mode,
        };
        *target = text.to_string();
    }

    fn set_history(&mut self, history: &History) {
        self.history = history.iter().map(|entry| entry.display()).collect();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use scientific_calculator::core::history::HistoryEntry;

    fn plain() {
        console::set_colors_enabled(false);
    }

    #[test]
    fn test_render_main_and_indicators() {
        plain();
        let mut display = TerminalDisplay::new();
        display.set_text(DisplaySlot::Main, "144");
        display.set_text(DisplaySlot::Memory, "M");
        display.set_text(DisplaySlot::AngleMode, "DEG");
        assert_eq!(display.render(), "144\nM DEG\n");
    }

    #[test]
    fn test_render_expression_and_error() {
        plain();
        let mut display = TerminalDisplay::new();
        display.set_text(DisplaySlot::Expression, "12 ÷");
        display.set_text(DisplaySlot::Main, "Error");
        display.set_text(DisplaySlot::Error, "No se puede dividir entre cero");
        display.set_text(DisplaySlot::AngleMode, "DEG");
        let text = display.render();
        assert!(text.starts_with("12 ÷\nError\n"));
        assert!(text.contains("No se puede dividir entre cero"));
    }

    #[test]
    fn test_render_history() {
        plain();
        let mut history = History::new();
        history.push(HistoryEntry::new("2 + 2", "4"));
        history.push(HistoryEntry::new("√(9)", "3"));

        let mut display = TerminalDisplay::new();
        display.set_history(&history);
        assert_eq!(display.history().len(), 2);
        let text = display.render_history();
        assert!(text.starts_with("h0 √(9) = 3\n"));
        assert!(text.contains("h1 2 + 2 = 4"));
    }

    #[test]
    fn test_render_empty_history() {
        plain();
        assert_eq!(TerminalDisplay::new().render_history(), "(empty history)\n");
    }
}
