//! Probe-then-own resolution of graph capabilities
//!
//! An [`OverlayHelper`] turns a graph of some base type `B` into a graph
//! with capability `T`. If the graph already supports `T` it is used as-is;
//! otherwise the helper builds an overlay `U` over it and keeps it alive for
//! as long as the helper lives. [`PairOverlayHelper`] chains two such
//! resolutions, feeding the first result into the second.
//!
//! Resolution happens once. The helpers use `OnceCell` internally, so
//! `apply` takes `&'g self` and hands out `&'g T` references that stay valid
//! for the helper's whole lifetime:
//!
//! ```
//! use handle_overlays::{
//!     HashGraph, PathPositionHandleGraph, PathPositionOverlayHelper, ResolutionState,
//! };
//!
//! let mut graph = HashGraph::new();
//! let a = graph.create_handle(1, "GATT").unwrap();
//! let path = graph.create_path("x").unwrap();
//! graph.append_step(path, a).unwrap();
//!
//! let helper = PathPositionOverlayHelper::new();
//! let positioned = helper.apply(&graph);
//! assert_eq!(positioned.get_path_length(path), 4);
//! assert_eq!(helper.state(), ResolutionState::Overlaid);
//! ```

use std::cell::OnceCell;
use std::fmt;
use tracing::{debug, warn};

/// A capability that can be probed for on a base graph type.
///
/// `probe` answers whether the concrete type behind `base` already
/// implements the capability, and if so returns `base` viewed as it. It
/// never builds anything.
pub trait Capability<'g, B: ?Sized + 'g> {
    fn probe(base: &'g B) -> Option<&'g Self>;
}

/// Static "every `Self` is a `B`" relation between capability types.
///
/// Chaining requires the first stage's capability to upcast into the second
/// stage's input type.
pub trait Upcast<B: ?Sized> {
    fn upcast(&self) -> &B;
}

impl<T: ?Sized> Upcast<T> for T {
    fn upcast(&self) -> &T {
        self
    }
}

/// An overlay that synthesizes capability `T` on top of a borrowed `B`.
///
/// The overlay never owns the graph it wraps.
pub trait Overlay<'g, B: ?Sized + 'g, T: ?Sized> {
    fn overlay(base: &'g B) -> Self;

    fn capability(&self) -> &T;
}

/// Where an [`OverlayHelper`] stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionState {
    /// `apply` has not been called yet
    Unresolved,
    /// The base graph supported the capability and is borrowed directly
    Native,
    /// An overlay was built and is owned by the helper
    Overlaid,
}

/// Resolves capability `T` for a base graph `B`, building overlay `U` if needed.
///
/// `B` and `T` are normally trait objects such as `dyn PathHandleGraph` and
/// `dyn PathPositionHandleGraph`; see the aliases in [`crate::overlay`].
pub struct OverlayHelper<'g, B: ?Sized, T: ?Sized, U> {
    base: OnceCell<&'g B>,
    overlay: OnceCell<Box<U>>,
    overlaid: OnceCell<&'g T>,
}

impl<'g, B: ?Sized, T: ?Sized, U> OverlayHelper<'g, B, T, U> {
    pub fn new() -> Self {
        Self {
            base: OnceCell::new(),
            overlay: OnceCell::new(),
            overlaid: OnceCell::new(),
        }
    }

    /// The resolved capability, or `None` before the first `apply`
    pub fn get(&self) -> Option<&'g T> {
        self.overlaid.get().copied()
    }

    /// The overlay this helper built, if it had to build one
    pub fn overlay(&self) -> Option<&U> {
        self.overlay.get().map(|overlay| &**overlay)
    }

    pub fn state(&self) -> ResolutionState {
        if self.overlay.get().is_some() {
            ResolutionState::Overlaid
        } else if self.overlaid.get().is_some() {
            ResolutionState::Native
        } else {
            ResolutionState::Unresolved
        }
    }
}

impl<'g, B, T, U> OverlayHelper<'g, B, T, U>
where
    B: ?Sized + 'g,
    T: ?Sized + Capability<'g, B>,
    U: Overlay<'g, B, T>,
{
    /// Resolve capability `T` for `base`.
    ///
    /// The first call probes `base`, building and keeping an overlay only
    /// when the probe fails. Every later call returns the same reference
    /// without probing again, even if it is handed a different graph.
    pub fn apply(&'g self, base: &'g B) -> &'g T {
        if let Some(&resolved) = self.overlaid.get() {
            if let Some(&bound) = self.base.get() {
                if !std::ptr::addr_eq(bound, base) {
                    warn!(
                        overlay = std::any::type_name::<U>(),
                        "helper already resolved against another graph; keeping the first resolution"
                    );
                }
            }
            return resolved;
        }

        self.base.get_or_init(|| base);
        let resolved = match T::probe(base) {
            Some(native) => {
                debug!(
                    capability = std::any::type_name::<T>(),
                    "graph supports capability natively"
                );
                native
            }
            None => {
                debug!(
                    capability = std::any::type_name::<T>(),
                    overlay = std::any::type_name::<U>(),
                    "building overlay"
                );
                self.overlay
                    .get_or_init(|| Box::new(U::overlay(base)))
                    .capability()
            }
        };
        self.overlaid.get_or_init(|| resolved)
    }
}

impl<B: ?Sized, T: ?Sized, U> Default for OverlayHelper<'_, B, T, U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: ?Sized, T: ?Sized, U> fmt::Debug for OverlayHelper<'_, B, T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayHelper")
            .field("state", &self.state())
            .finish()
    }
}

/// Two resolutions in sequence: `B1 -> T1`, then `T1` viewed as `B2 -> T2`.
///
/// Nesting is the only way to go beyond two stages.
pub struct PairOverlayHelper<'g, B1: ?Sized, T1: ?Sized, U1, B2: ?Sized, T2: ?Sized, U2> {
    first: OverlayHelper<'g, B1, T1, U1>,
    second: OverlayHelper<'g, B2, T2, U2>,
}

impl<'g, B1: ?Sized, T1: ?Sized, U1, B2: ?Sized, T2: ?Sized, U2>
    PairOverlayHelper<'g, B1, T1, U1, B2, T2, U2>
{
    pub fn new() -> Self {
        Self {
            first: OverlayHelper::new(),
            second: OverlayHelper::new(),
        }
    }

    /// The final capability, or `None` before the first `apply`
    pub fn get(&self) -> Option<&'g T2> {
        self.second.get()
    }

    pub fn first(&self) -> &OverlayHelper<'g, B1, T1, U1> {
        &self.first
    }

    pub fn second(&self) -> &OverlayHelper<'g, B2, T2, U2> {
        &self.second
    }
}

impl<'g, B1, T1, U1, B2, T2, U2> PairOverlayHelper<'g, B1, T1, U1, B2, T2, U2>
where
    B1: ?Sized + 'g,
    T1: ?Sized + Capability<'g, B1> + Upcast<B2>,
    U1: Overlay<'g, B1, T1>,
    B2: ?Sized + 'g,
    T2: ?Sized + Capability<'g, B2>,
    U2: Overlay<'g, B2, T2>,
{
    pub fn apply(&'g self, base: &'g B1) -> &'g T2 {
        let intermediate = self.first.apply(base);
        self.second.apply(<T1 as Upcast<B2>>::upcast(intermediate))
    }
}

impl<B1: ?Sized, T1: ?Sized, U1, B2: ?Sized, T2: ?Sized, U2> Default
    for PairOverlayHelper<'_, B1, T1, U1, B2, T2, U2>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<B1: ?Sized, T1: ?Sized, U1, B2: ?Sized, T2: ?Sized, U2> fmt::Debug
    for PairOverlayHelper<'_, B1, T1, U1, B2, T2, U2>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PairOverlayHelper")
            .field("first", &self.first.state())
            .field("second", &self.second.state())
            .finish()
    }
}
