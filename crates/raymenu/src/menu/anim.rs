//! Per-child animation slots driven by a host clock.
//!
//! Every child owns at most one animation. Starting another one on the same child
//! replaces it and the replaced animation never reports its end. Finished
//! animations are reported as [`AnimatorEvent`]s from [`Animator::advance`], in the
//! order they finish on the clock, ties broken by start order.

use super::easing::Interpolator;
use std::collections::BTreeMap;
use std::time::Duration;
use strum::Display as StrumDisplay;

/// Visual offset applied on top of a child's laid-out rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Vertical translation in pixels.
    pub dy: f64,
    /// Uniform scale about the child's center.
    pub scale: f64,
    pub alpha: f64,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        dy: 0.0,
        scale: 1.0,
        alpha: 1.0,
    };

    /// Whether drawing this transform would produce nothing on screen.
    pub fn is_degenerate(&self) -> bool {
        self.scale <= f64::EPSILON || self.alpha <= f64::EPSILON
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    TranslateY { from: f64, to: f64 },
    Scale { from: f64, to: f64 },
    Alpha { from: f64, to: f64 },
}

impl Motion {
    fn at(&self, factor: f64) -> Transform {
        let lerp = |from: f64, to: f64| from + (to - from) * factor;
        match *self {
            Motion::TranslateY { from, to } => Transform {
                dy: lerp(from, to),
                ..Transform::IDENTITY
            },
            Motion::Scale { from, to } => Transform {
                scale: lerp(from, to),
                ..Transform::IDENTITY
            },
            Motion::Alpha { from, to } => Transform {
                alpha: lerp(from, to),
                ..Transform::IDENTITY
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    pub motion: Motion,
    pub duration: Duration,
    /// Start offset. The starting value is shown while waiting.
    pub delay: Duration,
    pub interpolator: Interpolator,
    /// Keep the final value once finished instead of snapping back.
    pub fill_after: bool,
}

impl Animation {
    pub fn new(motion: Motion, duration: Duration) -> Self {
        Self {
            motion,
            duration,
            delay: Duration::ZERO,
            interpolator: Interpolator::default(),
            fill_after: false,
        }
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn interpolator(mut self, interpolator: Interpolator) -> Self {
        self.interpolator = interpolator;
        self
    }

    pub fn fill_after(mut self, fill_after: bool) -> Self {
        self.fill_after = fill_after;
        self
    }

    pub fn total(&self) -> Duration {
        self.delay + self.duration
    }

    pub fn sample(&self, elapsed: Duration) -> Transform {
        let Some(active) = elapsed.checked_sub(self.delay) else {
            return self.motion.at(self.interpolator.evaluate(0.0));
        };
        let t = if self.duration.is_zero() {
            1.0
        } else {
            (active.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
        };
        self.motion.at(self.interpolator.evaluate(t))
    }

    fn final_transform(&self) -> Transform {
        self.motion.at(self.interpolator.evaluate(1.0))
    }
}

/// Follow-up the menu runs when an animation finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    None,
    /// Hide the item unless the menu was reopened in the meantime.
    HideIfClosed,
    /// Hand the pending selection to the click listener.
    DeliverSelection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum Sequence {
    Open,
    Close,
    Select,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SequenceId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorEvent {
    Ended { view: usize, cue: Cue },
    /// Every animation of a sequence has ended or been replaced.
    SequenceComplete { kind: Sequence, interrupted: bool },
}

#[derive(Debug, Clone)]
struct Running {
    animation: Animation,
    started_at: Duration,
    order: u64,
    cue: Cue,
    sequence: SequenceId,
}

impl Running {
    fn ends_at(&self) -> Duration {
        self.started_at + self.animation.total()
    }
}

#[derive(Debug, Clone)]
enum Slot {
    Running(Running),
    Filled(Transform),
}

#[derive(Debug, Clone)]
struct SequenceState {
    kind: Sequence,
    pending: usize,
    interrupted: bool,
}

#[derive(Debug, Default)]
pub struct Animator {
    clock: Duration,
    slots: BTreeMap<usize, Slot>,
    sequences: BTreeMap<SequenceId, SequenceState>,
    next_order: u64,
    next_sequence: u64,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a group that reports [`AnimatorEvent::SequenceComplete`] once drained.
    pub fn begin(&mut self, kind: Sequence) -> SequenceId {
        let id = SequenceId(self.next_sequence);
        self.next_sequence += 1;
        self.sequences.insert(
            id,
            SequenceState {
                kind,
                pending: 0,
                interrupted: false,
            },
        );
        id
    }

    pub fn start(&mut self, view: usize, animation: Animation, cue: Cue, sequence: SequenceId) {
        if let Some(state) = self.sequences.get_mut(&sequence) {
            state.pending += 1;
        }

        let running = Running {
            animation,
            started_at: self.clock,
            order: self.next_order,
            cue,
            sequence,
        };
        self.next_order += 1;

        if let Some(Slot::Running(prev)) = self.slots.insert(view, Slot::Running(running)) {
            log::trace!("view {} animation replaced ({:?} dropped)", view, prev.cue);
            self.release(prev.sequence, true);
        }
    }

    /// Drops whatever is on `view`, running or filled.
    pub fn clear(&mut self, view: usize) {
        if let Some(Slot::Running(prev)) = self.slots.remove(&view) {
            self.release(prev.sequence, true);
        }
    }

    pub fn reset(&mut self) {
        self.slots.clear();
        self.sequences.clear();
    }

    pub fn is_animating(&self) -> bool {
        self.slots.values().any(|s| matches!(s, Slot::Running(_)))
    }

    pub fn transform(&self, view: usize) -> Transform {
        match self.slots.get(&view) {
            Some(Slot::Running(r)) => r.animation.sample(self.clock - r.started_at),
            Some(Slot::Filled(t)) => *t,
            None => Transform::IDENTITY,
        }
    }

    pub fn advance(&mut self, dt: Duration) -> Vec<AnimatorEvent> {
        self.clock += dt;

        let mut finished: Vec<(Duration, u64, usize)> = self
            .slots
            .iter()
            .filter_map(|(&view, slot)| match slot {
                Slot::Running(r) if r.ends_at() <= self.clock => Some((r.ends_at(), r.order, view)),
                _ => None,
            })
            .collect();
        finished.sort_unstable();

        let mut events = Vec::with_capacity(finished.len());
        for (_, _, view) in finished {
            let Some(Slot::Running(r)) = self.slots.remove(&view) else {
                continue;
            };
            if r.animation.fill_after {
                self.slots
                    .insert(view, Slot::Filled(r.animation.final_transform()));
            }
            self.release(r.sequence, false);
            events.push(AnimatorEvent::Ended { view, cue: r.cue });
        }

        let drained: Vec<SequenceId> = self
            .sequences
            .iter()
            .filter(|(_, s)| s.pending == 0)
            .map(|(&id, _)| id)
            .collect();
        for id in drained {
            if let Some(state) = self.sequences.remove(&id) {
                events.push(AnimatorEvent::SequenceComplete {
                    kind: state.kind,
                    interrupted: state.interrupted,
                });
            }
        }

        events
    }

    fn release(&mut self, sequence: SequenceId, interrupted: bool) {
        if let Some(state) = self.sequences.get_mut(&sequence) {
            state.pending = state.pending.saturating_sub(1);
            state.interrupted |= interrupted;
        }
    }
}
