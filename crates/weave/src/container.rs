//! Adaptive containers
//!
//! A container that sizes to its content can only know whether it should expand
//! after its children have rendered. [`adaptive_container`] wraps a container's
//! render with that negotiation: it sizes the container from the state negotiated so
//! far, installs fresh [`FillChannel`]s so children can report what they want, and
//! lets the commit phase update the state for the next pass.

use crate::channel::{request_fill, FillChannel, SizingDirective};
use crate::commit::Effect;
use crate::context::RenderContext;
use crate::environment::EnvironmentValues;
use crate::layout::{Arrangement, Axis};
use crate::modifier::NodeModifier;
use crate::state::{AxisPhase, ContainerState};

/// Main axis and arrangement of the nearest row or column
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StackLayout {
    pub axis: Axis,
    pub arrangement: Arrangement,
}

/// Render a container that adapts its sizing to what its children ask for.
///
/// - `label` names the container within the current scope; the container's
///   identity, and the scope of its children, is `<scope>/<label>`.
/// - `base` is the container's own modifier. The modifier from the context (e.g. an
///   outer frame) takes precedence over it and over the negotiated sizes.
/// - `fill_width` / `fill_height` start the axis out as expanding when the
///   container is first mounted.
/// - `extra` is applied after the negotiated sizes.
///
/// `content` receives the resolved modifier for the container node and the context
/// its children render with.
pub fn adaptive_container<R>(
    cx: &RenderContext<'_>,
    label: &str,
    base: NodeModifier,
    fill_width: bool,
    fill_height: bool,
    extra: NodeModifier,
    content: impl FnOnce(&NodeModifier, &RenderContext<'_>) -> R,
) -> R {
    let id = cx.id_for(label);
    let state = cx
        .pass()
        .state_for(&id, ContainerState::new(fill_width, fill_height));

    let mut modifier = cx.modifier().clone().then(&base);
    let mut negotiating = [false; 2];
    for axis in Axis::ALL {
        let phase = state.phase(axis);
        if modifier.fixed(axis).is_some() {
            if phase != AxisPhase::Unknown {
                cx.commit_queue().push(Effect::Reset {
                    container: id.clone(),
                    axis,
                });
            }
            continue;
        }
        negotiating[axis.index()] = true;

        let directive = match phase {
            AxisPhase::Unknown => continue,
            AxisPhase::Expanding => request_fill(cx, axis, true),
            AxisPhase::NonExpanding => request_fill(cx, axis, false),
        };
        modifier.constrain(axis, directive.to_size());
    }
    let modifier = modifier.then(&extra);

    log::trace!(
        "container {} renders with {:?}/{:?}",
        id,
        state.phase(Axis::Horizontal),
        state.phase(Axis::Vertical)
    );

    cx.content().within(&id).with_overrides(
        |env| {
            // A new container: nothing registered further up applies to its children
            env.set_stack(None);
            for axis in Axis::ALL {
                env.set_fill_modifier(axis, None);
                let channel = negotiating[axis.index()]
                    .then(|| FillChannel::new(id.clone(), axis, state.phase(axis)));
                env.set_fill_channel(axis, channel);
            }
        },
        |children| content(&modifier, children),
    )
}

/// Register a row or column's weighted directive for its main axis.
///
/// Must be called inside the environment of the container's own
/// [`adaptive_container`], after the fill directives were reset. The cross axis keeps
/// no weighted directive, so expanding children fill it to the maximum.
pub fn install_directional_channel(env: &mut EnvironmentValues, axis: Axis, arrangement: Arrangement) {
    env.set_fill_modifier(axis, Some(SizingDirective::weighted(1.0)));
    env.set_fill_modifier(axis.cross(), None);
    env.set_stack(Some(StackLayout { axis, arrangement }));
}
