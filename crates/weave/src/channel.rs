//! Fill negotiation channel
//!
//! A container installs one [`FillChannel`] per axis into the environment before
//! rendering its children. A child that wants to fill space calls [`request_fill`],
//! which answers how the child should size itself and, as a side effect, records in
//! the commit queue that the owning container has an expanding (or aligning)
//! descendant. The container observes the recorded state on the next render pass.

use crate::commit::Effect;
use crate::context::RenderContext;
use crate::environment::EnvironmentValues;
use crate::layout::{Axis, Size};
use crate::node::NodeId;
use crate::state::AxisPhase;

/// The sizing instruction returned by a negotiation call
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SizingDirective {
    /// Fill to the container's maximum extent
    FillMax,
    /// Take a proportional share of the remaining space of a row or column
    Weighted { weight: f32 },
    /// Size to intrinsic content, stretched to the extent siblings share
    MatchExtent,
}

impl SizingDirective {
    pub const fn weighted(weight: f32) -> Self {
        Self::Weighted { weight }
    }

    /// The node sizing this directive resolves to
    pub const fn to_size(self) -> Size {
        match self {
            SizingDirective::FillMax => Size::Fill,
            SizingDirective::Weighted { weight } => Size::Weight(weight),
            SizingDirective::MatchExtent => Size::MatchExtent,
        }
    }

    /// Directive handed out when no container owns the request
    pub fn fallback(wants_expand: bool, env: &EnvironmentValues, axis: Axis) -> Self {
        if wants_expand {
            env.fill_modifier(axis).unwrap_or(SizingDirective::FillMax)
        } else {
            SizingDirective::MatchExtent
        }
    }
}

/// A negotiation channel bound to one container and one axis
#[derive(Clone, Debug, PartialEq)]
pub struct FillChannel {
    container: NodeId,
    axis: Axis,
    /// Phase of the owning container when this pass started
    phase: AxisPhase,
}

impl FillChannel {
    pub fn new(container: NodeId, axis: Axis, phase: AxisPhase) -> Self {
        Self {
            container,
            axis,
            phase,
        }
    }

    /// Container that owns this channel
    pub fn container(&self) -> &NodeId {
        &self.container
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn phase(&self) -> AxisPhase {
        self.phase
    }

    /// Resolve a request and record the signal for the owning container.
    ///
    /// Repeated calls within one pass return the same directive; duplicate signals
    /// are folded by the commit queue.
    pub fn resolve(&self, wants_expand: bool, cx: &RenderContext<'_>) -> SizingDirective {
        let env = cx.environment();
        if wants_expand {
            if self.phase != AxisPhase::Expanding {
                cx.commit_queue().push(Effect::Expand {
                    container: self.container.clone(),
                    axis: self.axis,
                });
            }
        } else if self.phase == AxisPhase::Unknown {
            cx.commit_queue().push(Effect::MatchExtent {
                container: self.container.clone(),
                axis: self.axis,
            });
        }
        SizingDirective::fallback(wants_expand, env, self.axis)
    }
}

/// Ask the nearest container how to fill `axis`, signalling whether the caller
/// wants to expand.
///
/// Outside any container (or inside an axis whose size is fixed) there is nothing to
/// negotiate with: the unconditional fallback is returned and no state is touched.
pub fn request_fill(cx: &RenderContext<'_>, axis: Axis, wants_expand: bool) -> SizingDirective {
    match cx.environment().fill_channel(axis) {
        Some(channel) => {
            let directive = channel.resolve(wants_expand, cx);
            log::trace!(
                "{} requested {:?} fill (expand: {}) from {} -> {:?}",
                cx.scope(),
                axis,
                wants_expand,
                channel.container(),
                directive
            );
            directive
        }
        None => SizingDirective::fallback(wants_expand, cx.environment(), axis),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RenderPass;
    use crate::runtime::RenderOptions;
    use crate::state::ContainerStates;

    fn with_channel(phase: AxisPhase) -> impl FnOnce(&mut EnvironmentValues) {
        move |env| {
            env.set_fill_channel(
                Axis::Vertical,
                Some(FillChannel::new(NodeId::new("root/vstack"), Axis::Vertical, phase)),
            );
        }
    }

    #[test]
    fn test_root_request_falls_back_without_effects() {
        let states = ContainerStates::new();
        let options = RenderOptions::default();
        let pass = RenderPass::new(&states, &options);
        let cx = RenderContext::root(&pass);

        assert_eq!(request_fill(&cx, Axis::Vertical, true), SizingDirective::FillMax);
        assert_eq!(
            request_fill(&cx, Axis::Horizontal, false),
            SizingDirective::MatchExtent
        );
        assert!(pass.commit_queue().is_empty());
    }

    #[test]
    fn test_expand_prefers_registered_weight() {
        let states = ContainerStates::new();
        let options = RenderOptions::default();
        let pass = RenderPass::new(&states, &options);
        let root = RenderContext::root(&pass);

        root.with_overrides(
            |env| {
                with_channel(AxisPhase::Unknown)(env);
                env.set_fill_modifier(Axis::Vertical, Some(SizingDirective::weighted(1.0)));
            },
            |cx| {
                assert_eq!(
                    request_fill(cx, Axis::Vertical, true),
                    SizingDirective::weighted(1.0)
                );
            },
        );

        assert_eq!(
            pass.commit_queue().effects(),
            vec![Effect::Expand {
                container: NodeId::new("root/vstack"),
                axis: Axis::Vertical
            }]
        );
    }

    #[test]
    fn test_repeated_requests_are_idempotent() {
        let states = ContainerStates::new();
        let options = RenderOptions::default();
        let pass = RenderPass::new(&states, &options);
        let root = RenderContext::root(&pass);

        root.with_overrides(with_channel(AxisPhase::Unknown), |cx| {
            let first = request_fill(cx, Axis::Vertical, true);
            let second = request_fill(cx, Axis::Vertical, true);
            let third = request_fill(cx, Axis::Vertical, true);
            assert_eq!(first, SizingDirective::FillMax);
            assert_eq!(first, second);
            assert_eq!(second, third);
        });

        assert_eq!(pass.commit_queue().len(), 1);
    }

    #[test]
    fn test_recorded_phase_suppresses_signals() {
        let states = ContainerStates::new();
        let options = RenderOptions::default();
        let pass = RenderPass::new(&states, &options);
        let root = RenderContext::root(&pass);

        root.with_overrides(with_channel(AxisPhase::Expanding), |cx| {
            request_fill(cx, Axis::Vertical, true);
            request_fill(cx, Axis::Vertical, false);
        });
        root.with_overrides(with_channel(AxisPhase::NonExpanding), |cx| {
            assert_eq!(
                request_fill(cx, Axis::Vertical, false),
                SizingDirective::MatchExtent
            );
        });

        assert!(pass.commit_queue().is_empty());
    }
}
