//! Named painting layers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::default_layer;
use crate::palette::ColorCode;

/// Opaque layer identifier. Generated once, never changed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(String);

impl LayerId {
    pub fn generate() -> Self {
        LayerId(format!("layer-{}", uuid::Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LayerId {
    fn from(s: &str) -> Self {
        LayerId(s.to_string())
    }
}

impl From<String> for LayerId {
    fn from(s: String) -> Self {
        LayerId(s)
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    /// Paint associated with this layer; the paint tool follows it.
    pub color: ColorCode,
    pub visible: bool,
}

impl Layer {
    pub fn new(name: &str, color: ColorCode) -> Self {
        Layer {
            id: LayerId::generate(),
            name: name.to_string(),
            color,
            visible: true,
        }
    }

    /// The layer every fresh or migrated planner starts with.
    pub fn default_layer() -> Self {
        Layer {
            id: LayerId::from(default_layer::ID),
            name: default_layer::NAME.to_string(),
            color: ColorCode::Red,
            visible: true,
        }
    }
}

/// Calendar layout the views render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CalendarView {
    #[default]
    Linear,
    Classic,
    Column,
}

impl CalendarView {
    pub const ALL: [CalendarView; 3] = [CalendarView::Linear, CalendarView::Classic, CalendarView::Column];

    pub fn as_str(&self) -> &'static str {
        match self {
            CalendarView::Linear => "Linear",
            CalendarView::Classic => "Classic",
            CalendarView::Column => "Column",
        }
    }

    /// Exact, case-sensitive match against the three view names.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == name)
    }
}

impl fmt::Display for CalendarView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
