//! # lsys-turtle
//!
//! Grows branching structures from stochastic L-system grammars and traces them with a
//! 3D turtle.
//!
//! An [`LSystem`] owns the production rules and a cache of every derivation it has
//! computed. Asking for iteration `n` rewrites the axiom `n` times (reusing cached
//! passes), and [`LSystem::process`] walks the result with a turtle that records a
//! [`Branch`] for each `F` and a [`Geometry`] marker for each symbol it has no command
//! for. Mesh building and rendering are left to the consumer.

pub mod error;
pub mod grammar;
pub mod interpreter;
pub mod lsystem;
pub mod presets;
pub mod skeleton;
pub mod turtle;

pub use error::*;
pub use grammar::*;
pub use interpreter::*;
pub use lsystem::*;
pub use presets::*;
pub use skeleton::*;
pub use turtle::*;
