//! Scoped environment of ambient values
//!
//! `EnvironmentValues` is a snapshot of everything a view can read without it being
//! passed as an argument: the fill negotiation channels a container installed, the
//! weighted directives a row or column registered, the foreground color, and any
//! number of custom typed keys.
//!
//! Snapshots are never mutated in place while a subtree is rendering. Overriding a
//! value for a subtree derives a new snapshot, hands it to the subtree, and drops it
//! when the subtree returns, so the parent snapshot is always restored exactly.

use crate::channel::{FillChannel, SizingDirective};
use crate::color::Color;
use crate::container::StackLayout;
use crate::layout::Axis;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// A typed key for a custom environment value
///
/// # Example
///
/// ```
/// use weave::{EnvironmentKey, EnvironmentValues};
///
/// struct LineLimit;
///
/// impl EnvironmentKey for LineLimit {
///     type Value = Option<usize>;
///
///     fn default_value() -> Self::Value {
///         None
///     }
/// }
///
/// let env = EnvironmentValues::new();
/// env.with_overrides(|env| env.set::<LineLimit>(Some(2)), |env| {
///     assert_eq!(env.get::<LineLimit>(), Some(2));
/// });
/// assert_eq!(env.get::<LineLimit>(), None);
/// ```
pub trait EnvironmentKey: 'static {
    type Value: Clone + PartialEq + fmt::Debug + 'static;

    /// Value read when no scope has set the key
    fn default_value() -> Self::Value;
}

/// Type-erased custom value, comparable so snapshots can be compared
trait ErasedValue {
    fn as_any(&self) -> &dyn Any;
    fn eq_erased(&self, other: &dyn ErasedValue) -> bool;
    fn fmt_erased(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl<T: PartialEq + fmt::Debug + 'static> ErasedValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_erased(&self, other: &dyn ErasedValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| other == self)
    }

    fn fmt_erased(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// An immutable-by-convention snapshot of ambient values
#[derive(Clone)]
pub struct EnvironmentValues {
    fill_width: Option<FillChannel>,
    fill_height: Option<FillChannel>,
    fill_width_modifier: Option<SizingDirective>,
    fill_height_modifier: Option<SizingDirective>,
    stack: Option<StackLayout>,
    foreground_color: Option<Color>,
    is_enabled: bool,
    custom: Rc<HashMap<TypeId, Rc<dyn ErasedValue>>>,
}

impl EnvironmentValues {
    /// The root snapshot: no channels, no directives, enabled
    pub fn new() -> Self {
        Self {
            fill_width: None,
            fill_height: None,
            fill_width_modifier: None,
            fill_height_modifier: None,
            stack: None,
            foreground_color: None,
            is_enabled: true,
            custom: Rc::new(HashMap::new()),
        }
    }

    /// Run `body` with a derived snapshot carrying `mutations`.
    ///
    /// `self` is untouched, so once `body` returns the caller observes exactly the
    /// snapshot it had before.
    pub fn with_overrides<R>(
        &self,
        mutations: impl FnOnce(&mut EnvironmentValues),
        body: impl FnOnce(&EnvironmentValues) -> R,
    ) -> R {
        let derived = self.derive(mutations);
        body(&derived)
    }

    /// Create a derived snapshot
    pub fn derive(&self, mutations: impl FnOnce(&mut EnvironmentValues)) -> Self {
        let mut derived = self.clone();
        mutations(&mut derived);
        derived
    }

    // ========== Fill negotiation ==========

    /// Channel installed by the nearest adaptive container for an axis
    pub fn fill_channel(&self, axis: Axis) -> Option<&FillChannel> {
        match axis {
            Axis::Horizontal => self.fill_width.as_ref(),
            Axis::Vertical => self.fill_height.as_ref(),
        }
    }

    pub fn set_fill_channel(&mut self, axis: Axis, channel: Option<FillChannel>) {
        match axis {
            Axis::Horizontal => self.fill_width = channel,
            Axis::Vertical => self.fill_height = channel,
        }
    }

    /// Weighted directive registered by the nearest row or column for an axis
    pub fn fill_modifier(&self, axis: Axis) -> Option<SizingDirective> {
        match axis {
            Axis::Horizontal => self.fill_width_modifier,
            Axis::Vertical => self.fill_height_modifier,
        }
    }

    pub fn set_fill_modifier(&mut self, axis: Axis, directive: Option<SizingDirective>) {
        match axis {
            Axis::Horizontal => self.fill_width_modifier = directive,
            Axis::Vertical => self.fill_height_modifier = directive,
        }
    }

    /// Layout of the nearest enclosing row or column
    pub fn stack(&self) -> Option<StackLayout> {
        self.stack
    }

    pub fn set_stack(&mut self, stack: Option<StackLayout>) {
        self.stack = stack;
    }

    // ========== Styling ==========

    pub fn foreground_color(&self) -> Option<Color> {
        self.foreground_color
    }

    pub fn set_foreground_color(&mut self, color: Option<Color>) {
        self.foreground_color = color;
    }

    pub fn is_enabled(&self) -> bool {
        self.is_enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.is_enabled = enabled;
    }

    // ========== Custom keys ==========

    /// Read a custom value, falling back to the key's default
    pub fn get<K: EnvironmentKey>(&self) -> K::Value {
        self.custom
            .get(&TypeId::of::<K>())
            .and_then(|value| (**value).as_any().downcast_ref::<K::Value>())
            .cloned()
            .unwrap_or_else(K::default_value)
    }

    pub fn set<K: EnvironmentKey>(&mut self, value: K::Value) {
        let value: Rc<dyn ErasedValue> = Rc::new(value);
        Rc::make_mut(&mut self.custom).insert(TypeId::of::<K>(), value);
    }

    /// Remove a custom value so reads fall back to the default
    pub fn unset<K: EnvironmentKey>(&mut self) {
        if self.custom.contains_key(&TypeId::of::<K>()) {
            Rc::make_mut(&mut self.custom).remove(&TypeId::of::<K>());
        }
    }
}

impl Default for EnvironmentValues {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for EnvironmentValues {
    fn eq(&self, other: &Self) -> bool {
        self.fill_width == other.fill_width
            && self.fill_height == other.fill_height
            && self.fill_width_modifier == other.fill_width_modifier
            && self.fill_height_modifier == other.fill_height_modifier
            && self.stack == other.stack
            && self.foreground_color == other.foreground_color
            && self.is_enabled == other.is_enabled
            && self.custom.len() == other.custom.len()
            && self.custom.iter().all(|(key, value)| {
                other
                    .custom
                    .get(key)
                    .is_some_and(|other| (**value).eq_erased(&**other))
            })
    }
}

impl fmt::Debug for EnvironmentValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Custom<'a>(&'a HashMap<TypeId, Rc<dyn ErasedValue>>);

        impl fmt::Debug for Custom<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let mut list = f.debug_list();
                for value in self.0.values() {
                    list.entry(&format_args!("{}", Erased(&**value)));
                }
                list.finish()
            }
        }

        struct Erased<'a>(&'a dyn ErasedValue);

        impl fmt::Display for Erased<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt_erased(f)
            }
        }

        f.debug_struct("EnvironmentValues")
            .field("fill_width", &self.fill_width)
            .field("fill_height", &self.fill_height)
            .field("fill_width_modifier", &self.fill_width_modifier)
            .field("fill_height_modifier", &self.fill_height_modifier)
            .field("stack", &self.stack)
            .field("foreground_color", &self.foreground_color)
            .field("is_enabled", &self.is_enabled)
            .field("custom", &Custom(&self.custom))
            .finish()
    }
}
