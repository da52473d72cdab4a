//! Free-hand signature capture.
//!
//! The pad records pointer movement as connected line segments while a
//! "pressed" state is active. Mouse and touch bindings route to the same
//! four operations: `press` starts a stroke, `drag` extends it, `release`
//! and `leave` end it. The blank check is "zero strokes recorded",
//! independent of the capture technology.

use serde::{Deserialize, Serialize};

/// Serialization of a pad that has received no strokes.
pub const BLANK_SIGNATURE: &str = "data:,";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignaturePad {
    strokes: Vec<Vec<Point>>,
    pressed: bool,
    stroke_open: bool,
    last: Option<Point>,
}

impl SignaturePad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer down: the next drag starts a stroke from this point.
    pub fn press(&mut self, point: Point) {
        self.pressed = true;
        self.stroke_open = false;
        self.last = Some(point);
    }

    /// Pointer movement. Ignored unless pressed. A press with no movement
    /// records nothing.
    pub fn drag(&mut self, point: Point) {
        if !self.pressed {
            return;
        }
        let Some(last) = self.last else {
            return;
        };

        if self.stroke_open {
            if let Some(stroke) = self.strokes.last_mut() {
                stroke.push(point);
            }
        } else {
            self.strokes.push(vec![last, point]);
            self.stroke_open = true;
        }
        self.last = Some(point);
    }

    /// Pointer up: ends the current stroke.
    pub fn release(&mut self) {
        self.pressed = false;
        self.stroke_open = false;
        self.last = None;
    }

    /// Pointer leaving the surface ends the stroke the same way a release
    /// does.
    pub fn leave(&mut self) {
        self.release();
    }

    /// Reset to a blank surface.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.pressed = false;
        self.stroke_open = false;
        self.last = None;
    }

    pub fn is_blank(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    pub fn segment_count(&self) -> usize {
        self.strokes
            .iter()
            .map(|stroke| stroke.len().saturating_sub(1))
            .sum()
    }

    pub fn strokes(&self) -> &[Vec<Point>] {
        &self.strokes
    }

    /// Serialize the captured strokes. A blank pad yields the well-known
    /// blank representation.
    pub fn encode(&self) -> String {
        if self.is_blank() {
            return BLANK_SIGNATURE.to_string();
        }
        format!("data:application/json,{}", serde_json::json!(self.strokes))
    }
}
