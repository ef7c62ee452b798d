//! Placemats and sticky notes: annotation elements with no ports

use super::id::ElementId;
use super::serde_helpers::{color32_serde, rect_serde};
use egui::{Color32, Rect};
use serde::{Deserialize, Serialize};

/// A colored backdrop grouping nodes visually
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placemat {
    pub id: ElementId,
    pub title: String,
    #[serde(with = "rect_serde")]
    pub rect: Rect,
    #[serde(with = "color32_serde")]
    pub color: Color32,
    pub collapsed: bool,
    /// Elements hidden while the placemat is collapsed
    pub hidden_elements: Vec<ElementId>,
    /// Stacking order; higher draws on top. Unique within a graph.
    pub z_order: i32,
}

impl Placemat {
    pub fn new(title: impl Into<String>, rect: Rect) -> Self {
        Self {
            id: ElementId::new(),
            title: title.into(),
            rect,
            color: crate::constants::placemat::DEFAULT_COLOR,
            collapsed: false,
            hidden_elements: vec![],
            z_order: 0,
        }
    }
}

/// Sticky note color themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StickyNoteTheme {
    #[default]
    Classic,
    Dark,
    Orange,
    Green,
    Blue,
    Red,
    Purple,
    Teal,
}

/// Sticky note font sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StickyNoteTextSize {
    Small,
    #[default]
    Medium,
    Large,
    Huge,
}

/// Free-form text note on the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StickyNote {
    pub id: ElementId,
    pub title: String,
    pub contents: String,
    #[serde(with = "rect_serde")]
    pub rect: Rect,
    pub theme: StickyNoteTheme,
    pub text_size: StickyNoteTextSize,
}

impl StickyNote {
    pub fn new(rect: Rect) -> Self {
        Self {
            id: ElementId::new(),
            title: String::new(),
            contents: String::new(),
            rect,
            theme: StickyNoteTheme::default(),
            text_size: StickyNoteTextSize::default(),
        }
    }
}
