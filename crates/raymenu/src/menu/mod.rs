pub mod anim;
pub mod easing;
pub mod layout;
pub mod model;

pub use anim::{Animation, AnimatorEvent, Motion, Sequence, Transform};
pub use easing::{Easing, Interpolator};
pub use layout::{ItemSlot, MenuLayout};
pub use model::{ChildVisual, MenuStatus, RayMenu};

/// Grid width in items. Fixed; the gap arithmetic assumes it.
pub const COLUMNS: usize = 3;
/// Child index of the toggle control.
pub const TOGGLE: usize = 0;
