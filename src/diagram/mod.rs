//! Layout-agnostic diagram models derived from a [`Model`](crate::Model)
//!
//! Generators only borrow the model and never fail halfway: they either
//! return a complete diagram or an error naming the element that stopped them.

pub mod sequence;
pub mod state;

pub use sequence::{Interaction, SequenceDiagram};
pub use state::{StateDiagram, StateNode, TransitionEdge};
