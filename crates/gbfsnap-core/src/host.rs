use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::StoreError;
use crate::js::Prop;

/// Read-only view of the page's in-memory state.
pub trait HostState {
    /// The page's `Game` global, if the page defines one.
    fn game(&self) -> Option<&Value>;
}

impl HostState for Value {
    fn game(&self) -> Option<&Value> {
        Some(self)
    }
}

/// Root accessor for extractors.
pub fn game<S: HostState + ?Sized>(state: &S) -> Prop<'_> {
    Prop::new("Game", state.game())
}

/// `Game` loaded from a JSON dump of the page.
#[derive(Debug, Clone)]
pub struct GameState {
    game: Value,
}

impl GameState {
    /// Accepts either the `Game` object itself or a window dump that holds it
    /// under a `Game` key.
    pub fn from_value(value: Value) -> Self {
        let game = match value {
            Value::Object(mut map) if map.contains_key("Game") && !map.contains_key("view") => {
                map.remove("Game").unwrap_or(Value::Null)
            }
            other => other,
        };
        Self { game }
    }

    pub fn from_file(path: &Path) -> Result<Self, StoreError> {
        let data = fs::read(path).map_err(|e| StoreError::io(path, e))?;
        let value: Value = serde_json::from_slice(&data)?;
        Ok(Self::from_value(value))
    }
}

impl HostState for GameState {
    fn game(&self) -> Option<&Value> {
        Some(&self.game)
    }
}
