//! Visual separation of parallel edges.
//!
//! Edges sharing a directed endpoint pair are fanned symmetrically around the
//! straight line between the two nodes: half bow one way, half the other, and
//! edges further from the center curve more so they clear the inner ones.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveType {
    /// Renderer's own smooth curve, no offset.
    Default,
    Clockwise,
    #[serde(rename = "counterclockwise")]
    CounterClockwise,
    Straight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelSide {
    Top,
    Bottom,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveAssignment {
    pub curve_type: CurveType,
    pub roundness: f32,
    /// `None` leaves label placement to the renderer.
    pub label_side: Option<LabelSide>,
    /// Signed distance from the fan center, in edge slots.
    pub offset: f32,
    pub self_loop: bool,
}

impl CurveAssignment {
    pub fn neutral() -> Self {
        Self {
            curve_type: CurveType::Default,
            roundness: 0.0,
            label_side: None,
            offset: 0.0,
            self_loop: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvatureAssigner {
    pub base_roundness: f32,
    pub roundness_step: f32,
    pub self_loop_roundness: f32,
}

impl Default for CurvatureAssigner {
    fn default() -> Self {
        Self {
            base_roundness: 0.2,
            roundness_step: 0.2,
            self_loop_roundness: 0.6,
        }
    }
}

impl CurvatureAssigner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assignments for a group of `count` edges sharing one endpoint pair, in
    /// group order.
    pub fn assign(&self, count: usize, self_loop: bool) -> Vec<CurveAssignment> {
        debug_assert!(count >= 1, "edge groups are never empty");

        if self_loop {
            // Loops on the same node are never fanned against each other.
            return vec![self.self_loop(); count];
        }
        if count == 1 {
            return vec![CurveAssignment::neutral()];
        }
        (0..count).map(|index| self.fan(index, count)).collect()
    }

    pub fn self_loop(&self) -> CurveAssignment {
        CurveAssignment {
            curve_type: CurveType::Clockwise,
            roundness: self.self_loop_roundness,
            label_side: Some(LabelSide::Middle),
            offset: 0.0,
            self_loop: true,
        }
    }

    /// Slot `index` of a fan of `count` parallel edges.
    pub fn fan(&self, index: usize, count: usize) -> CurveAssignment {
        let middle = (count as f32 - 1.0) / 2.0;
        let offset = index as f32 - middle;
        let forward = offset >= 0.0;

        CurveAssignment {
            curve_type: if forward {
                CurveType::Clockwise
            } else {
                CurveType::CounterClockwise
            },
            roundness: self.base_roundness + offset.abs() * self.roundness_step,
            label_side: Some(if forward {
                LabelSide::Top
            } else {
                LabelSide::Bottom
            }),
            offset,
            self_loop: false,
        }
    }
}
