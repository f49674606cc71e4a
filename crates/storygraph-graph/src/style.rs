//! Graph View Style System
//!
//! Provides colors and line styles for dialogue nodes and edges, shared by
//! every renderer adapter.

use storygraph_core::{DialogueNode, EdgeKind};

/// RGB color representation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    pub fn darken(&self, factor: f32) -> Self {
        Self {
            r: ((self.r as f32) * (1.0 - factor)) as u8,
            g: ((self.g as f32) * (1.0 - factor)) as u8,
            b: ((self.b as f32) * (1.0 - factor)) as u8,
            a: self.a,
        }
    }
}

/// Edge color and line style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeStyle {
    pub color: Color,
    pub width: f32,
    pub dashed: bool,
    pub arrow_head: bool,
    /// Flowing dash animation, used for auto-advance edges.
    pub animated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeStyle {
    pub fill: Color,
    pub border: Color,
    pub text: Color,
}

// ============================================================================
// Color Constants
// ============================================================================

pub const COLOR_NODE_FILL: Color = Color::rgb(74, 144, 226);
pub const COLOR_NODE_TEXT: Color = Color::rgb(255, 255, 255);
pub const COLOR_ENTRY_FILL: Color = Color::rgb(80, 140, 100);
pub const COLOR_ENDING_FILL: Color = Color::rgb(130, 100, 160);

pub const COLOR_EDGE_CHOICE: Color = Color::rgb(128, 128, 128);
pub const COLOR_EDGE_CONDITIONAL: Color = Color::rgb(80, 130, 180);
pub const COLOR_EDGE_FAILURE: Color = Color::rgb(255, 0, 0);
pub const COLOR_EDGE_LINEAR: Color = Color::rgb(170, 170, 170);

pub const TAG_START: &str = "start";
pub const TAG_END: &str = "end";

// ============================================================================
// Style Functions
// ============================================================================

pub fn get_edge_style(kind: EdgeKind) -> EdgeStyle {
    EdgeStyle {
        color: get_edge_color(kind),
        width: get_edge_width(kind),
        dashed: matches!(kind, EdgeKind::Choice | EdgeKind::Failure),
        arrow_head: true,
        animated: kind == EdgeKind::Linear,
    }
}

pub fn get_edge_color(kind: EdgeKind) -> Color {
    match kind {
        EdgeKind::Choice => COLOR_EDGE_CHOICE,
        EdgeKind::Conditional => COLOR_EDGE_CONDITIONAL,
        EdgeKind::Failure => COLOR_EDGE_FAILURE,
        EdgeKind::Linear => COLOR_EDGE_LINEAR,
    }
}

fn get_edge_width(kind: EdgeKind) -> f32 {
    match kind {
        EdgeKind::Choice => 1.5,
        _ => 1.0,
    }
}

/// Entry nodes and `start`-tagged nodes share one color, `end`-tagged nodes
/// another.
pub fn get_node_style(node: &DialogueNode, is_entry: bool) -> NodeStyle {
    let fill = if is_entry || node.has_tag(TAG_START) {
        COLOR_ENTRY_FILL
    } else if node.has_tag(TAG_END) {
        COLOR_ENDING_FILL
    } else {
        COLOR_NODE_FILL
    };

    NodeStyle {
        fill,
        border: fill.darken(0.2),
        text: COLOR_NODE_TEXT,
    }
}
