//! # weave
//!
//! Layout negotiation engine for declarative view trees.
//!
//! Some layout models give every child what it needs and split the *remaining* space
//! among children that want to expand. Others let a single "fill" child take all
//! remaining space unless every expanding sibling carries a proportional weight, which
//! only rows and columns understand. This crate renders the first model on top of the
//! second: containers discover after rendering whether a descendant wanted to expand,
//! and pick their own sizing on the next render pass.
//!
//! ## Core Types
//!
//! - [`View`] - Declarative view tree, rendered into a retained [`Node`] tree
//! - [`Runtime`] - Render loop that repeats passes until container states settle
//! - [`RenderContext`] - Everything a view sees while rendering
//!
//! ## Negotiation
//!
//! - [`EnvironmentValues`] - Scoped ambient values, restored when a subtree returns
//! - [`request_fill`] - Ask the nearest container how to fill an axis
//! - [`adaptive_container`] - Wrap a container's render with the negotiation
//! - [`install_directional_channel`] - Let a row or column hand out weighted fills
//! - [`ContainerStates`] / [`CommitQueue`] - Persisted state and deferred effects
//!
//! ## Layout
//!
//! - [`Size`], [`Layout`], [`Arrangement`] - Sizing and arrangement of nodes
//! - [`ContentMeasurer`] - Trait for text measurement

mod channel;
mod color;
mod commit;
mod container;
mod content;
mod context;
mod debug;
mod environment;
mod layout;
mod measure;
mod modifier;
mod node;
mod primitives;
mod render;
mod runtime;
mod state;
mod view;

// Core types
pub use color::*;
pub use content::*;
pub use context::*;
pub use debug::*;
pub use layout::*;
pub use measure::*;
pub use node::*;
pub use primitives::*;
pub use runtime::*;
pub use view::*;

// Negotiation
pub use channel::*;
pub use commit::*;
pub use container::*;
pub use environment::*;
pub use modifier::*;
pub use render::*;
pub use state::*;
