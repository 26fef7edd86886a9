//! Interpreter that walks a derived symbol string with a turtle.
//!
//! Each character is mapped to a [`TurtleOp`] and applied in order. `F` emits a
//! [`Branch`], unknown symbols emit a [`Geometry`] marker, and `[`/`]` save and
//! restore the full turtle state through a [`TurtleStack`].

use crate::error::Result;
use crate::skeleton::{Branch, Geometry};
use crate::turtle::{TurtleOp, TurtleStack, TurtleState};
use tracing::debug;

/// A turtle plus its stack of saved states, driven one symbol at a time.
///
/// Create a fresh interpreter per pass; it starts at the origin facing `+X` with `+Z` up
/// and an empty stack.
#[derive(Clone, Debug)]
pub struct Interpreter {
    angle: f32,
    step: f32,
    turtle: TurtleState,
    stack: TurtleStack,
}

impl Interpreter {
    /// `angle` is in degrees, `step` in world units. Neither is validated.
    pub fn new(angle: f32, step: f32) -> Self {
        Self {
            angle,
            step,
            turtle: TurtleState::default(),
            stack: TurtleStack::new(),
        }
    }

    /// Current pose of the turtle.
    pub fn state(&self) -> &TurtleState {
        &self.turtle
    }

    /// Number of states currently saved on the stack.
    pub fn stack_depth(&self) -> usize {
        self.stack.depth()
    }

    /// Interprets every symbol of `insn`, appending results to `branches` and `geometry`.
    ///
    /// Stops at the first `]` that finds the stack empty and returns
    /// [`Error::StackUnderflow`](crate::Error::StackUnderflow). Output produced before
    /// that point stays in the lists. The stack does not have to be empty afterwards.
    pub fn run(
        &mut self,
        insn: &str,
        branches: &mut Vec<Branch>,
        geometry: &mut Vec<Geometry>,
    ) -> Result<()> {
        let (branches_before, geometry_before) = (branches.len(), geometry.len());

        for (index, sym) in insn.chars().enumerate() {
            self.apply(index, TurtleOp::from_symbol(sym), branches, geometry)?;
        }

        debug!(
            symbols = insn.chars().count(),
            branches = branches.len() - branches_before,
            markers = geometry.len() - geometry_before,
            stack_depth = self.stack.depth(),
            "interpreted derivation"
        );
        Ok(())
    }

    /// Applies a single operation. `index` locates the symbol for error reporting.
    pub fn apply(
        &mut self,
        index: usize,
        op: TurtleOp,
        branches: &mut Vec<Branch>,
        geometry: &mut Vec<Geometry>,
    ) -> Result<()> {
        match op {
            TurtleOp::Draw => {
                let start = self.turtle.position;
                self.turtle.move_forward(self.step);
                branches.push(Branch::new(start, self.turtle.position));
            }
            TurtleOp::Move => self.turtle.move_forward(self.step),
            TurtleOp::Yaw(s) => self.turtle.yaw(self.angle * s),
            TurtleOp::Pitch(s) => self.turtle.pitch(self.angle * s),
            TurtleOp::Roll(s) => self.turtle.roll(self.angle * s),
            TurtleOp::TurnAround => self.turtle.turn_around(),
            TurtleOp::Push => self.stack.push(self.turtle),
            TurtleOp::Pop => self.turtle = self.stack.pop(index)?,
            TurtleOp::Mark(symbol) => geometry.push(Geometry {
                position: self.turtle.position,
                symbol,
            }),
        }
        Ok(())
    }
}
