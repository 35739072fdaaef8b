//! Deferred state mutations
//!
//! Negotiation never mutates container state while a pass is rendering. Each signal
//! becomes an [`Effect`] queued here and applied, in call order, by the runtime once
//! the pass has finished.

use crate::layout::Axis;
use crate::node::NodeId;
use std::cell::RefCell;
use std::collections::HashSet;

/// A pending mutation of one container's expansion state
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Effect {
    /// A descendant wants to expand along `axis`
    Expand { container: NodeId, axis: Axis },
    /// A descendant wants to align with siblings along `axis` without expanding
    MatchExtent { container: NodeId, axis: Axis },
    /// The axis received an explicit fixed size; forget what was negotiated
    Reset { container: NodeId, axis: Axis },
}

impl Effect {
    /// Container the effect applies to
    pub fn container(&self) -> &NodeId {
        match self {
            Effect::Expand { container, .. }
            | Effect::MatchExtent { container, .. }
            | Effect::Reset { container, .. } => container,
        }
    }

    pub fn axis(&self) -> Axis {
        match self {
            Effect::Expand { axis, .. }
            | Effect::MatchExtent { axis, .. }
            | Effect::Reset { axis, .. } => *axis,
        }
    }
}

/// Ordered queue of effects collected during one render pass
#[derive(Debug, Default)]
pub struct CommitQueue {
    inner: RefCell<Queued>,
}

#[derive(Debug, Default)]
struct Queued {
    order: Vec<Effect>,
    seen: HashSet<Effect>,
}

impl CommitQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an effect. An effect already queued this pass is not queued again,
    /// so the first occurrence fixes its position in the order.
    pub fn push(&self, effect: Effect) {
        let mut inner = self.inner.borrow_mut();
        if inner.seen.insert(effect.clone()) {
            inner.order.push(effect);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().order.is_empty()
    }

    /// Copy of the queued effects, in order
    pub fn effects(&self) -> Vec<Effect> {
        self.inner.borrow().order.clone()
    }

    /// Take all queued effects, leaving the queue empty
    pub fn drain(&self) -> Vec<Effect> {
        self.inner.take().order
    }
}
