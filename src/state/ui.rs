use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{ScrollfxError, ScrollfxResult};

/// Storage key for the persisted theme.
pub const THEME_KEY: &str = "theme";
/// Storage key for the persisted "intro already played" flag.
pub const INTRO_SEEN_KEY: &str = "intro_seen";

/// Site color theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Default theme.
    #[default]
    Dark,
    /// Light theme.
    Light,
}

impl Theme {
    /// Persisted spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl FromStr for Theme {
    type Err = ScrollfxError;

    fn from_str(s: &str) -> ScrollfxResult<Self> {
        match s.trim() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(ScrollfxError::configuration(format!(
                "unknown theme '{other}'"
            ))),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Process-wide UI flags shared by every view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct UiState {
    /// Active theme.
    pub theme: Theme,
    /// Whether the intro animation already played in this browser.
    pub intro_seen: bool,
}

/// Persistent key/value storage backing [`UiStore`].
pub trait StateStore {
    /// Stored value for `key`, if any.
    fn load(&self, key: &str) -> Option<String>;
    /// Persist `value` under `key`.
    fn save(&mut self, key: &str, value: &str) -> ScrollfxResult<()>;
}

/// In-memory [`StateStore`].
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style seed value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }
}

impl StateStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> ScrollfxResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The only ways [`UiState`] can change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiChange {
    /// Switch to a specific theme.
    SetTheme(Theme),
    /// Flip between dark and light.
    ToggleTheme,
    /// Record that the intro finished.
    MarkIntroSeen,
}

/// Owner of [`UiState`]: loaded once from storage, changed only through
/// [`UiStore::apply`], which writes the change back.
#[derive(Debug)]
pub struct UiStore<S: StateStore> {
    store: S,
    state: UiState,
    revision: u64,
}

impl<S: StateStore> UiStore<S> {
    /// Load the persisted state. Missing or unreadable values fall back to defaults.
    pub fn init(store: S) -> Self {
        let theme = match store.load(THEME_KEY) {
            None => Theme::default(),
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "unknown persisted theme; using dark");
                Theme::Dark
            }),
        };
        let intro_seen = store.load(INTRO_SEEN_KEY).as_deref() == Some("true");
        Self {
            store,
            state: UiState { theme, intro_seen },
            revision: 0,
        }
    }

    /// Current state.
    pub fn state(&self) -> UiState {
        self.state
    }

    /// Incremented on every effective change; consumers compare it to skip work.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Apply `change`, persist it, and return the new state.
    ///
    /// A change that leaves the state as it was is neither persisted nor counted.
    pub fn apply(&mut self, change: UiChange) -> ScrollfxResult<UiState> {
        let mut next = self.state;
        match change {
            UiChange::SetTheme(theme) => next.theme = theme,
            UiChange::ToggleTheme => next.theme = next.theme.toggled(),
            UiChange::MarkIntroSeen => next.intro_seen = true,
        }
        if next == self.state {
            return Ok(next);
        }

        if next.theme != self.state.theme {
            self.store.save(THEME_KEY, next.theme.as_str())?;
        }
        if next.intro_seen != self.state.intro_seen {
            self.store
                .save(INTRO_SEEN_KEY, if next.intro_seen { "true" } else { "false" })?;
        }
        tracing::debug!(?change, "ui state changed");
        self.state = next;
        self.revision += 1;
        Ok(next)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/state/ui.rs"]
mod tests;
