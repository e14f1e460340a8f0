//! Per-day paint and annotation data.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::days::DayKey;
use crate::error::PlannerError;
use crate::palette::ColorTextureCode;

/// Layout hint for annotation text that does not fit the cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextOverflow {
    #[default]
    OverflowX,
    OverflowY,
    NoOverflow,
}

impl TextOverflow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextOverflow::OverflowX => "overflow-x",
            TextOverflow::OverflowY => "overflow-y",
            TextOverflow::NoOverflow => "no-overflow",
        }
    }
}

impl FromStr for TextOverflow {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overflow-x" => Ok(TextOverflow::OverflowX),
            "overflow-y" => Ok(TextOverflow::OverflowY),
            "no-overflow" => Ok(TextOverflow::NoOverflow),
            other => Err(PlannerError::UnknownCode(other.to_string())),
        }
    }
}

impl fmt::Display for TextOverflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What one layer holds for one day.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DateCellData {
    pub color_texture: Option<ColorTextureCode>,
    pub text: Option<String>,
    pub text_overflow_direction: Option<TextOverflow>,
}

impl DateCellData {
    pub fn painted(code: ColorTextureCode) -> Self {
        DateCellData {
            color_texture: Some(code),
            ..Default::default()
        }
    }

    /// Annotation text, if it has any visible characters.
    pub fn visible_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// A cell with neither paint nor text carries no information.
    pub fn is_empty(&self) -> bool {
        self.color_texture.is_none() && self.visible_text().is_none()
    }
}

/// Day → cell mapping owned by a single layer. Never holds empty cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayerData(BTreeMap<DayKey, DateCellData>);

impl LayerData {
    pub const fn new() -> Self {
        LayerData(BTreeMap::new())
    }

    pub fn get(&self, day: &DayKey) -> Option<&DateCellData> {
        self.0.get(day)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DayKey, &DateCellData)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Store `cell` for `day`, or drop the entry when the cell is empty.
    pub fn insert(&mut self, day: DayKey, cell: DateCellData) {
        if cell.is_empty() {
            self.0.remove(&day);
        } else {
            self.0.insert(day, cell);
        }
    }

    pub fn remove(&mut self, day: &DayKey) -> Option<DateCellData> {
        self.0.remove(day)
    }

    pub fn paint(&mut self, day: DayKey, code: ColorTextureCode) {
        let mut cell = self.0.remove(&day).unwrap_or_default();
        cell.color_texture = Some(code);
        self.insert(day, cell);
    }

    /// Remove the paint from `day`, keeping any annotation.
    pub fn erase(&mut self, day: DayKey) {
        if let Some(mut cell) = self.0.remove(&day) {
            cell.color_texture = None;
            self.insert(day, cell);
        }
    }

    /// Set or clear the annotation on `day`. Blank text clears it.
    pub fn set_text(&mut self, day: DayKey, text: &str, overflow: Option<TextOverflow>) {
        let mut cell = self.0.remove(&day).unwrap_or_default();
        if text.trim().is_empty() {
            cell.text = None;
            cell.text_overflow_direction = None;
        } else {
            cell.text = Some(text.to_string());
            cell.text_overflow_direction = overflow.or(cell.text_overflow_direction);
        }
        self.insert(day, cell);
    }

    pub fn paint_range(&mut self, from: DayKey, to: DayKey, code: ColorTextureCode) {
        for day in from.range_to(to) {
            self.paint(day, code);
        }
    }

    pub fn erase_range(&mut self, from: DayKey, to: DayKey) {
        for day in from.range_to(to) {
            self.erase(day);
        }
    }
}

impl FromIterator<(DayKey, DateCellData)> for LayerData {
    fn from_iter<I: IntoIterator<Item = (DayKey, DateCellData)>>(iter: I) -> Self {
        let mut data = LayerData::new();
        for (day, cell) in iter {
            data.insert(day, cell);
        }
        data
    }
}
