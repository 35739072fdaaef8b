//! Render context passed down the view tree
//!
//! A render pass walks the view tree once. Every render call receives a
//! [`RenderContext`]: an immutable bundle of the environment snapshot, the modifier
//! the next emitted node should carry, an optional composer installed by the parent,
//! and the identity scope of the current position in the tree.
//!
//! Deriving a context (new scope, overridden environment, extra modifier) never
//! touches the parent's context. The only shared, mutable part of a pass is the
//! [`RenderPass`] itself, which collects the containers that rendered and the effects
//! they queued for the commit phase.

use crate::commit::CommitQueue;
use crate::environment::EnvironmentValues;
use crate::modifier::NodeModifier;
use crate::node::{Node, NodeId};
use crate::runtime::RenderOptions;
use crate::state::{ContainerState, ContainerStates, PassRecord};
use crate::view::View;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Shared bookkeeping of one render pass
///
/// Holds a read-only view of the committed container states and collects
/// everything the commit phase needs.
pub struct RenderPass<'a> {
    /// Container states as of the last commit
    states: &'a ContainerStates,
    options: &'a RenderOptions,
    /// Effects queued by negotiation calls during this pass
    queue: CommitQueue,
    /// Containers rendered during this pass, in render order
    rendered: RefCell<Vec<(NodeId, ContainerState)>>,
}

impl<'a> RenderPass<'a> {
    pub fn new(states: &'a ContainerStates, options: &'a RenderOptions) -> Self {
        Self {
            states,
            options,
            queue: CommitQueue::new(),
            rendered: RefCell::new(Vec::new()),
        }
    }

    /// Record that a container rendered and return the state it renders with
    ///
    /// A container seen for the first time renders with `initial`, which also becomes
    /// its persisted state at the next commit.
    pub fn state_for(&self, id: &NodeId, initial: ContainerState) -> ContainerState {
        let mut rendered = self.rendered.borrow_mut();
        if rendered.iter().any(|(seen, _)| seen == id) {
            log::warn!("container {} rendered more than once in one pass", id);
        } else {
            rendered.push((id.clone(), initial));
        }
        self.states.get(id).unwrap_or(initial)
    }

    pub fn commit_queue(&self) -> &CommitQueue {
        &self.queue
    }

    pub fn options(&self) -> &RenderOptions {
        self.options
    }

    /// Number of containers rendered so far
    pub fn rendered_count(&self) -> usize {
        self.rendered.borrow().len()
    }

    /// Close the pass and hand its record to the commit phase
    pub fn finish(self) -> PassRecord {
        PassRecord {
            rendered: self.rendered.into_inner(),
            effects: self.queue.drain(),
        }
    }
}

impl fmt::Debug for RenderPass<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderPass")
            .field("rendered", &self.rendered.borrow().len())
            .field("queued_effects", &self.queue.len())
            .finish()
    }
}

/// Wraps how each child of a container is rendered
///
/// A container installs a composer with [`RenderContext::content_with_composer`].
/// The walker hands every child (groups are flattened first) to the composer
/// instead of rendering it directly. The composer receives a context without
/// itself installed and must render the view, usually through [`crate::render`].
pub trait Composer {
    fn compose(&self, view: &View, cx: &RenderContext<'_>, out: &mut Vec<Node>);
}

/// Everything a view can see while it renders
#[derive(Clone)]
pub struct RenderContext<'p> {
    pass: &'p RenderPass<'p>,
    environment: EnvironmentValues,
    modifier: NodeModifier,
    composer: Option<Rc<dyn Composer>>,
    scope: Rc<str>,
}

impl<'p> RenderContext<'p> {
    /// Context for the root of a render pass
    pub fn root(pass: &'p RenderPass<'p>) -> Self {
        Self::with_environment(pass, EnvironmentValues::new())
    }

    /// Root context starting from a custom environment
    pub fn with_environment(pass: &'p RenderPass<'p>, environment: EnvironmentValues) -> Self {
        Self {
            pass,
            environment,
            modifier: NodeModifier::new(),
            composer: None,
            scope: Rc::from("root"),
        }
    }

    pub fn environment(&self) -> &EnvironmentValues {
        &self.environment
    }

    /// Modifier the next emitted node should carry
    pub fn modifier(&self) -> &NodeModifier {
        &self.modifier
    }

    pub fn composer(&self) -> Option<&Rc<dyn Composer>> {
        self.composer.as_ref()
    }

    /// Identity path of the current position in the tree
    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn pass(&self) -> &'p RenderPass<'p> {
        self.pass
    }

    pub fn commit_queue(&self) -> &'p CommitQueue {
        self.pass.commit_queue()
    }

    pub fn options(&self) -> &'p RenderOptions {
        self.pass.options()
    }

    /// Identity of an element rendered at the current scope
    pub fn id_for(&self, label: &str) -> NodeId {
        NodeId::new(format!("{}/{}", self.scope, label))
    }

    /// Context for the children of the element being rendered
    ///
    /// The modifier and composer belong to the element itself and are not inherited.
    pub fn content(&self) -> Self {
        Self {
            modifier: NodeModifier::new(),
            composer: None,
            ..self.clone()
        }
    }

    /// Children context whose children are each rendered through `composer`
    pub fn content_with_composer(&self, composer: Rc<dyn Composer>) -> Self {
        Self {
            composer: Some(composer),
            ..self.content()
        }
    }

    pub fn without_composer(&self) -> Self {
        Self {
            composer: None,
            ..self.clone()
        }
    }

    /// Derive a context with an adjusted modifier
    pub fn with_modifier(&self, adjust: impl FnOnce(&mut NodeModifier)) -> Self {
        let mut derived = self.clone();
        adjust(&mut derived.modifier);
        derived
    }

    /// Run `body` with an environment carrying `mutations`
    ///
    /// This context is left untouched, so the caller's environment is restored when
    /// `body` returns.
    pub fn with_overrides<R>(
        &self,
        mutations: impl FnOnce(&mut EnvironmentValues),
        body: impl FnOnce(&RenderContext<'p>) -> R,
    ) -> R {
        let derived = Self {
            environment: self.environment.derive(mutations),
            ..self.clone()
        };
        body(&derived)
    }

    /// Derive a context one level deeper in the identity path
    pub fn scoped(&self, segment: impl fmt::Display) -> Self {
        Self {
            scope: Rc::from(format!("{}/{}", self.scope, segment)),
            ..self.clone()
        }
    }

    /// Derive a context whose scope is the given element
    pub fn within(&self, id: &NodeId) -> Self {
        Self {
            scope: Rc::from(id.as_str()),
            ..self.clone()
        }
    }
}

impl fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("scope", &self.scope)
            .field("modifier", &self.modifier)
            .field("has_composer", &self.composer.is_some())
            .field("environment", &self.environment)
            .finish()
    }
}
