//! Crate-wide constants and default values
//!
//! Spacing, default sizes and history depths used by commands and state

/// Edge constants
pub mod edge {
    /// Tightness given to freshly added control points
    pub const DEFAULT_TIGHTNESS: f32 = 100.0;

    /// Valid tightness range for control points
    pub const TIGHTNESS_RANGE: std::ops::RangeInclusive<f32> = 0.0..=100.0;
}

/// Node duplication constants
pub mod itemize {
    use egui::Vec2;

    /// Offset applied to each duplicate created when itemizing a node
    pub const OFFSET: Vec2 = Vec2::new(0.0, 60.0);

    /// Offset of the node that replaces a converted constant or variable node
    pub const CONVERT_OFFSET: Vec2 = Vec2::new(0.0, 40.0);
}

/// Portal placement constants
pub mod portal {
    /// Vertical distance between stacked exit portals on one input
    pub const DEFAULT_ROW_HEIGHT: f32 = 24.0;

    /// Horizontal distance between a port and the portal created for it
    pub const DEFAULT_OFFSET: f32 = 75.0;

    /// Horizontal distance for portals created opposite an existing portal
    pub const OPPOSITE_OFFSET: f32 = 250.0;
}

/// Placemat constants
pub mod placemat {
    use egui::Color32;

    /// Default placemat color
    pub const DEFAULT_COLOR: Color32 = Color32::from_rgb(60, 70, 90);

    /// Title given to placemats created without one
    pub const DEFAULT_TITLE: &str = "Placemat";
}

/// Sticky note constants
pub mod sticky_note {
    use egui::Vec2;

    /// Default size for sticky notes created from a point
    pub const DEFAULT_SIZE: Vec2 = Vec2::new(200.0, 160.0);
}

/// State tracking constants
pub mod state {
    /// Number of committed change-sets kept per state component
    pub const DEFAULT_CHANGESET_HISTORY: usize = 64;

    /// Number of undo records kept
    pub const DEFAULT_MAX_UNDO_DEPTH: usize = 100;
}

/// Variable naming constants
pub mod variable {
    /// Name used when a declaration is created with an empty name
    pub const DEFAULT_NAME: &str = "variable";
}
