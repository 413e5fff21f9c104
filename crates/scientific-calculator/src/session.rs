//! A calculator wired to its host capabilities

use tracing::debug;

use crate::config::EngineConfig;
use crate::core::CalculatorEngine;
use crate::host::{DisplaySlot, DisplaySurface, ExponentPrompt, KeyValueStore};
use crate::keypad::KeypadAction;
use crate::persistence::Persistence;

/// Engine plus store plus display
///
/// Every action is followed by a save (failures are only logged) and a full
/// re-render of the display.
#[derive(Debug)]
pub struct Session<S, D> {
    engine: CalculatorEngine,
    store: S,
    display: D,
    persistence: Persistence,
}

impl<S, D> Session<S, D>
where
    S: KeyValueStore,
    D: DisplaySurface,
{
    /// Restores persisted state from `store` and renders it
    pub fn open(config: EngineConfig, store: S, display: D) -> Self {
        let persistence = Persistence::from_config(&config);
        let mut engine = CalculatorEngine::with_config(config);
        persistence.load(&store, &mut engine);

        let mut session = Self {
            engine,
            store,
            display,
            persistence,
        };
        session.render();
        session
    }

    /// Runs one action, then persists and re-renders
    pub fn press<P>(&mut self, action: KeypadAction, prompt: &mut P)
    where
        P: ExponentPrompt + ?Sized,
    {
        debug!(?action, "session action");
        self.engine.apply(action, prompt);
        self.persistence.save(&mut self.store, &self.engine);
        self.render();
    }

    /// Clears a displayed error (the host's delayed recovery)
    pub fn recover(&mut self) {
        self.engine.recover();
        self.render();
    }

    /// Forgets everything, including persisted memory and history
    pub fn reset(&mut self) {
        self.persistence.clear(&mut self.store);
        self.engine = CalculatorEngine::with_config(self.engine.config().clone());
        self.render();
    }

    /// The engine
    #[must_use]
    pub fn engine(&self) -> &CalculatorEngine {
        &self.engine
    }

    /// The backing store
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The display surface
    #[must_use]
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Mutable display surface
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Splits the session into engine, store and display
    pub fn into_parts(self) -> (CalculatorEngine, S, D) {
        (self.engine, self.store, self.display)
    }

    fn render(&mut self) {
        let view = self.engine.view();
        for slot in DisplaySlot::ALL {
            let text = match slot {
                DisplaySlot::Main => view.main.as_str(),
                DisplaySlot::Expression => view.expression.as_str(),
                DisplaySlot::Error => view.error.as_deref().unwrap_or_default(),
                DisplaySlot::Memory => view.memory.as_str(),
                DisplaySlot::AngleMode => view.angle_mode.as_str(),
            };
            self.display.set_text(slot, text);
        }
        self.display.set_history(self.engine.history());
    }
}
