//! Turtle state, the push-down stack of saved states, and the symbol-to-operation table.

use crate::error::{Error, Result};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// The pose of the turtle: a position and an orthonormal orientation frame.
///
/// The frame is stored as a single rotation. Its local axes map to the turtle's
/// named directions as follows:
///
/// | Local axis | Direction |
/// |------------|-----------|
/// | `+X`       | forward   |
/// | `+Y`       | left      |
/// | `+Z`       | up        |
///
/// The default state sits at the world origin with the identity rotation, so it
/// faces `+X` with `+Z` up.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurtleState {
    /// Current world-space position of the cursor.
    pub position: Vec3,

    /// Current world-space orientation.
    pub rotation: Quat,
}

impl Default for TurtleState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl TurtleState {
    /// Returns the turtle's heading (local X axis) in world space.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Returns the turtle's left direction (local Y axis) in world space.
    pub fn left(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Returns the turtle's up direction (local Z axis) in world space.
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Advances the position `distance` units along the heading.
    pub fn move_forward(&mut self, distance: f32) {
        self.position += self.forward() * distance;
    }

    /// Turns about the up axis by `degrees`. Positive values swing the heading toward left.
    pub fn yaw(&mut self, degrees: f32) {
        self.rotate_local(Vec3::Z, degrees);
    }

    /// Tilts about the left axis by `degrees`. Positive values pitch the heading down.
    pub fn pitch(&mut self, degrees: f32) {
        self.rotate_local(Vec3::Y, degrees);
    }

    /// Rolls about the heading by `degrees`. Positive values swing up toward right.
    pub fn roll(&mut self, degrees: f32) {
        self.rotate_local(Vec3::X, degrees);
    }

    /// Reverses the heading by turning half a revolution about the up axis.
    pub fn turn_around(&mut self) {
        self.rotation = (self.rotation * Quat::from_rotation_z(PI)).normalize();
    }

    // Post-multiplying applies the rotation about the turtle's own axis rather than
    // the world axis. Renormalizing the quaternion keeps the frame unit length over
    // long symbol strings.
    fn rotate_local(&mut self, axis: Vec3, degrees: f32) {
        let rot = Quat::from_axis_angle(axis, degrees.to_radians());
        self.rotation = (self.rotation * rot).normalize();
    }
}

/// Last-in-first-out storage of turtle snapshots used by `[` and `]`.
#[derive(Clone, Debug, Default)]
pub struct TurtleStack {
    states: Vec<TurtleState>,
}

impl TurtleStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves a copy of `state`.
    pub fn push(&mut self, state: TurtleState) {
        self.states.push(state);
    }

    /// Removes and returns the most recently pushed state.
    ///
    /// `index` is the position of the offending symbol in the instruction string and is
    /// only used to report [`Error::StackUnderflow`] when the stack is empty.
    pub fn pop(&mut self, index: usize) -> Result<TurtleState> {
        self.states.pop().ok_or(Error::StackUnderflow { index })
    }

    pub fn depth(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// Operations the turtle performs, one per symbol of a derivation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TurtleOp {
    /// Move forward and record a branch segment (`F`).
    Draw,
    /// Move forward without recording anything (`f`).
    Move,
    /// Rotate about up by the default angle times the sign (`+`/`-`).
    Yaw(f32),
    /// Rotate about left by the default angle times the sign (`&`/`^`).
    Pitch(f32),
    /// Rotate about forward by the default angle times the sign (`\` / `/`).
    Roll(f32),
    /// Turn 180 degrees about up (`|`).
    TurnAround,
    /// Save the full turtle state onto the stack (`[`).
    Push,
    /// Restore the most recently pushed turtle state (`]`).
    Pop,
    /// Drop a geometry marker tagged with the symbol (anything else).
    Mark(char),
}

impl TurtleOp {
    /// Maps a derivation symbol to the operation it triggers.
    pub fn from_symbol(sym: char) -> Self {
        match sym {
            'F' => Self::Draw,
            'f' => Self::Move,
            '+' => Self::Yaw(1.0),
            '-' => Self::Yaw(-1.0),
            '&' => Self::Pitch(1.0),
            '^' => Self::Pitch(-1.0),
            '\\' => Self::Roll(1.0),
            '/' => Self::Roll(-1.0),
            '|' => Self::TurnAround,
            '[' => Self::Push,
            ']' => Self::Pop,
            other => Self::Mark(other),
        }
    }
}
