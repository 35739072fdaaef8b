//! Persisted expansion state of adaptive containers
//!
//! This module provides `ContainerStates`, the store that keeps each adaptive
//! container's negotiated flags across render passes. A container reads its state at
//! the start of a pass; the state only changes when the runtime commits the effects
//! the pass queued.

use crate::commit::Effect;
use crate::layout::Axis;
use crate::node::NodeId;
use std::collections::{HashMap, HashSet};

/// Negotiated phase of one axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AxisPhase {
    /// No descendant has asked to fill; size to content
    Unknown,
    /// A descendant wants to align with its siblings without expanding
    NonExpanding,
    /// A descendant wants to expand
    Expanding,
}

/// The two flags a container persists for one axis
///
/// At most one of them is set. Setters keep that true; [`AxisState::from_flags`]
/// can build a conflicting value (e.g. when restoring saved state), which
/// [`ContainerStates::check_invariants`] reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AxisState {
    is_fill: bool,
    is_non_expanding_fill: bool,
}

impl AxisState {
    /// Initial state; `fill` starts the axis out as expanding
    pub const fn new(fill: bool) -> Self {
        Self {
            is_fill: fill,
            is_non_expanding_fill: false,
        }
    }

    /// Build a state from raw flags without checking them
    pub const fn from_flags(is_fill: bool, is_non_expanding_fill: bool) -> Self {
        Self {
            is_fill,
            is_non_expanding_fill,
        }
    }

    pub const fn is_fill(&self) -> bool {
        self.is_fill
    }

    pub const fn is_non_expanding_fill(&self) -> bool {
        self.is_non_expanding_fill
    }

    pub const fn is_conflicting(&self) -> bool {
        self.is_fill && self.is_non_expanding_fill
    }

    pub fn phase(&self) -> AxisPhase {
        debug_assert!(
            !self.is_conflicting(),
            "axis is flagged both expanding and non-expanding"
        );
        if self.is_fill {
            AxisPhase::Expanding
        } else if self.is_non_expanding_fill {
            AxisPhase::NonExpanding
        } else {
            AxisPhase::Unknown
        }
    }

    /// Record an expanding descendant. Returns whether the state changed.
    ///
    /// A non-expanding axis upgrades to expanding and drops its non-expanding flag,
    /// since the two flags are never set together. The flags themselves are therefore
    /// not monotonic; the phase order `Unknown < NonExpanding < Expanding` is.
    pub fn expand(&mut self) -> bool {
        let changed = !self.is_fill || self.is_non_expanding_fill;
        self.is_fill = true;
        self.is_non_expanding_fill = false;
        changed
    }

    /// Record an aligning descendant. Expanding axes stay expanding.
    pub fn match_extent(&mut self) -> bool {
        if self.is_fill || self.is_non_expanding_fill {
            return false;
        }
        self.is_non_expanding_fill = true;
        true
    }

    /// Forget the negotiated phase
    pub fn reset(&mut self) -> bool {
        let changed = self.is_fill || self.is_non_expanding_fill;
        *self = Self::default();
        changed
    }
}

/// Expansion state of one adaptive container
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ContainerState {
    pub width: AxisState,
    pub height: AxisState,
}

impl ContainerState {
    pub const fn new(fill_width: bool, fill_height: bool) -> Self {
        Self {
            width: AxisState::new(fill_width),
            height: AxisState::new(fill_height),
        }
    }

    pub fn axis(&self, axis: Axis) -> AxisState {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    pub fn axis_mut(&mut self, axis: Axis) -> &mut AxisState {
        match axis {
            Axis::Horizontal => &mut self.width,
            Axis::Vertical => &mut self.height,
        }
    }

    pub fn phase(&self, axis: Axis) -> AxisPhase {
        self.axis(axis).phase()
    }
}

/// A container state that breaks the flag invariant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("container `{container}` is flagged both expanding and non-expanding on the {axis:?} axis")]
    ConflictingFill { container: NodeId, axis: Axis },
}

/// What a finished render pass hands to the commit phase
#[derive(Debug, Default)]
pub struct PassRecord {
    /// Every container rendered in the pass, with the state it would start with if new
    pub rendered: Vec<(NodeId, ContainerState)>,
    /// Effects queued during the pass, in call order
    pub effects: Vec<Effect>,
}

/// Container states keyed by container identity
pub struct ContainerStates {
    states: HashMap<NodeId, ContainerState>,
}

impl ContainerStates {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
        }
    }

    /// Get the state of a container, if it is mounted
    pub fn get(&self, id: &NodeId) -> Option<ContainerState> {
        self.states.get(id).copied()
    }

    /// Get or create state for a container
    pub fn get_or_insert(&mut self, id: NodeId, initial: ContainerState) -> &mut ContainerState {
        self.states.entry(id).or_insert(initial)
    }

    /// Overwrite the state of a container (used when restoring saved state)
    pub fn restore(&mut self, id: NodeId, state: ContainerState) {
        self.states.insert(id, state);
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.states.contains_key(id)
    }

    pub fn remove(&mut self, id: &NodeId) -> bool {
        self.states.remove(id).is_some()
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &ContainerState)> {
        self.states.iter()
    }

    /// Apply one effect. Returns whether any flag changed.
    pub fn apply(&mut self, effect: &Effect) -> bool {
        let Some(state) = self.states.get_mut(effect.container()) else {
            log::warn!(
                "dropping {:?}: container {} is not mounted",
                effect,
                effect.container()
            );
            return false;
        };

        let axis = state.axis_mut(effect.axis());
        let changed = match effect {
            Effect::Expand { .. } => axis.expand(),
            Effect::MatchExtent { .. } => axis.match_extent(),
            Effect::Reset { .. } => axis.reset(),
        };
        if changed {
            log::trace!("applied {:?}", effect);
        }
        changed
    }

    /// Commit a finished pass: unmount containers that were not rendered, mount new
    /// ones with their initial state, then apply effects in order.
    ///
    /// Returns whether any mounted container's flags changed.
    pub fn commit(&mut self, record: PassRecord) -> bool {
        let unmounted = {
            let rendered: HashSet<&NodeId> = record.rendered.iter().map(|(id, _)| id).collect();
            let before = self.states.len();
            self.states.retain(|id, _| rendered.contains(id));
            before - self.states.len()
        };
        if unmounted > 0 {
            log::debug!("unmounted {} container(s)", unmounted);
        }

        for (id, initial) in record.rendered {
            self.states.entry(id).or_insert(initial);
        }

        let mut changed = false;
        for effect in &record.effects {
            changed |= self.apply(effect);
        }
        changed
    }

    /// Verify that no axis is flagged both expanding and non-expanding
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for (id, state) in &self.states {
            for axis in Axis::ALL {
                if state.axis(axis).is_conflicting() {
                    return Err(InvariantViolation::ConflictingFill {
                        container: id.clone(),
                        axis,
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for ContainerStates {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ContainerStates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerStates")
            .field("num_states", &self.states.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_state_transitions() {
        let mut axis = AxisState::default();
        assert_eq!(axis.phase(), AxisPhase::Unknown);

        assert!(axis.match_extent());
        assert_eq!(axis.phase(), AxisPhase::NonExpanding);
        assert!(!axis.match_extent());

        assert!(axis.expand());
        assert_eq!(axis.phase(), AxisPhase::Expanding);
        assert!(!axis.is_non_expanding_fill());

        // Expanding is sticky against aligning signals
        assert!(!axis.match_extent());
        assert!(!axis.expand());
        assert_eq!(axis.phase(), AxisPhase::Expanding);

        assert!(axis.reset());
        assert_eq!(axis.phase(), AxisPhase::Unknown);
        assert!(!axis.reset());
    }

    #[test]
    fn test_signals_never_lower_phase() {
        // Every sequence of four expand / match_extent signals
        for bits in 0u8..16 {
            let mut axis = AxisState::default();
            let mut previous = axis.phase();
            for step in 0..4 {
                if bits & (1 << step) != 0 {
                    axis.expand();
                } else {
                    axis.match_extent();
                }
                assert!(!axis.is_conflicting());
                assert!(axis.phase() >= previous);
                previous = axis.phase();
            }
        }
    }

    #[test]
    fn test_initial_fill() {
        let state = ContainerState::new(true, false);
        assert_eq!(state.phase(Axis::Horizontal), AxisPhase::Expanding);
        assert_eq!(state.phase(Axis::Vertical), AxisPhase::Unknown);
    }

    #[test]
    fn test_commit_mounts_applies_and_unmounts() {
        let mut states = ContainerStates::new();
        let a = NodeId::new("root/a");
        let b = NodeId::new("root/b");

        let changed = states.commit(PassRecord {
            rendered: vec![
                (a.clone(), ContainerState::default()),
                (b.clone(), ContainerState::default()),
            ],
            effects: vec![Effect::Expand {
                container: a.clone(),
                axis: Axis::Vertical,
            }],
        });
        assert!(changed);
        assert_eq!(states.get(&a).unwrap().phase(Axis::Vertical), AxisPhase::Expanding);
        assert_eq!(states.get(&b), Some(ContainerState::default()));

        // `b` disappears, `a` keeps its state
        let changed = states.commit(PassRecord {
            rendered: vec![(a.clone(), ContainerState::default())],
            effects: Vec::new(),
        });
        assert!(!changed);
        assert!(!states.contains(&b));
        assert_eq!(states.get(&a).unwrap().phase(Axis::Vertical), AxisPhase::Expanding);
    }

    #[test]
    fn test_effect_for_unmounted_container_is_dropped() {
        let mut states = ContainerStates::new();
        let changed = states.apply(&Effect::Expand {
            container: NodeId::new("ghost"),
            axis: Axis::Horizontal,
        });
        assert!(!changed);
        assert!(states.is_empty());
    }

    #[test]
    fn test_check_invariants_reports_conflict() {
        let mut states = ContainerStates::new();
        states.restore(NodeId::new("ok"), ContainerState::new(true, false));
        assert!(states.check_invariants().is_ok());

        let mut conflicting = ContainerState::default();
        conflicting.height = AxisState::from_flags(true, true);
        states.restore(NodeId::new("bad"), conflicting);

        assert_eq!(
            states.check_invariants(),
            Err(InvariantViolation::ConflictingFill {
                container: NodeId::new("bad"),
                axis: Axis::Vertical,
            })
        );
    }
}
