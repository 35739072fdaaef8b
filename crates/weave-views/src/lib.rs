//! # weave-views
//!
//! Views built on the weave negotiation engine.
//!
//! Stacks are adaptive containers: they size to their content until a child asks to
//! expand, and rows and columns share their main axis between expanding children.
//! Text, spacers, shapes and dividers are the leaves that drive the negotiation.

mod divider;
mod rectangle;
mod spacer;
mod stack;
mod text;

pub use divider::*;
pub use rectangle::*;
pub use spacer::*;
pub use stack::*;
pub use text::*;
