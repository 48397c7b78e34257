// Copyright 2026 the Glidepane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glidepane Transition: animated transforms over an external interpolation
//! engine.
//!
//! The host brings the actual interpolation (a CSS transition, a platform
//! animator, a tween library) behind the [`InterpolationEngine`] trait; this
//! crate owns the lifecycle around it:
//!
//! - At most one live transition per [`TransitionController`]. Starting a
//!   new one settles the old handle as [`TransitionStatus::Interrupted`]
//!   strictly before the new engine begins.
//! - [`TransitionHandle`]s report `Running` until they settle as
//!   `Finished`, `Cancelled`, or `Interrupted`; acting on a settled handle
//!   is surfaced as [`TransitionError::AlreadySettled`] instead of
//!   corrupting the live transition.
//! - Interruption is seamless: the engine is paused, its live value is read
//!   back (through [`glidepane_transform::parse_matrix`]) and committed one
//!   frame later, then the engine is cancelled. The surface never jumps to
//!   the target or back to the start.
//! - Natural completion is detected by polling: the host calls
//!   [`TransitionController::on_frame`] once per paint frame, which commits
//!   the target through [`TransformState`] when the engine reports it is no
//!   longer running.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::rc::Rc;
use alloc::string::String;
use core::cell::Cell;
use core::fmt;

use glidepane_transform::{ParseMatrixError, Transform, TransformState, parse_matrix};

/// Easing curve requested from the interpolation engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant rate.
    Linear,
    /// Slow start.
    EaseIn,
    /// Slow finish.
    EaseOut,
    /// Slow start and finish.
    #[default]
    EaseInOut,
}

/// The host's interpolation machinery.
///
/// One transition at a time: `begin` always supersedes the previous one.
/// `current_value` reports the live interpolated value as a serialized
/// matrix, the same format [`glidepane_transform::encode_matrix`] produces.
pub trait InterpolationEngine {
    /// Starts interpolating `from` to `to` over `duration` milliseconds.
    fn begin(&mut self, from: Transform, to: Transform, duration: f64, easing: Easing);
    /// Freezes the interpolation at its current value.
    fn pause(&mut self);
    /// Abandons the interpolation, releasing engine resources.
    fn cancel(&mut self);
    /// Jumps the interpolation to its end value.
    fn finish(&mut self);
    /// `true` while the interpolation is still advancing.
    fn is_running(&self) -> bool;
    /// The live interpolated value, serialized as `matrix(...)`.
    fn current_value(&self) -> String;
}

/// Where a transition ended up.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TransitionStatus {
    /// Still animating.
    Running,
    /// Reached its target; the target was committed.
    Finished,
    /// Abandoned; nothing was committed.
    Cancelled,
    /// Superseded or interrupted; the live value at interruption was
    /// committed.
    Interrupted,
}

/// Observer side of one transition.
///
/// Cheap to clone; all clones share the status.
#[derive(Clone, Debug)]
pub struct TransitionHandle {
    status: Rc<Cell<TransitionStatus>>,
}

impl TransitionHandle {
    /// The transition's current status.
    #[must_use]
    pub fn status(&self) -> TransitionStatus {
        self.status.get()
    }

    /// `true` once the transition has settled (any non-`Running` status).
    #[must_use]
    pub fn done(&self) -> bool {
        self.status.get() != TransitionStatus::Running
    }
}

/// Errors from acting on a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransitionError {
    /// The handle already settled; the operation has no transition to act
    /// on. State is unchanged.
    AlreadySettled,
    /// The engine's live value did not parse as a transform matrix, so a
    /// seamless interrupt is impossible.
    Readback(ParseMatrixError),
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadySettled => write!(f, "transition has already settled"),
            Self::Readback(e) => write!(f, "interrupt readback failed: {e}"),
        }
    }
}

impl core::error::Error for TransitionError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::AlreadySettled => None,
            Self::Readback(e) => Some(e),
        }
    }
}

impl From<ParseMatrixError> for TransitionError {
    fn from(e: ParseMatrixError) -> Self {
        Self::Readback(e)
    }
}

#[derive(Debug)]
struct ActiveTransition {
    target: Transform,
    status: Rc<Cell<TransitionStatus>>,
    /// Live value captured by a pending interrupt, committed at the next
    /// frame boundary.
    pending_commit: Option<Transform>,
}

/// Drives at most one transition at a time over an [`InterpolationEngine`].
#[derive(Debug)]
pub struct TransitionController<E: InterpolationEngine> {
    engine: E,
    active: Option<ActiveTransition>,
}

impl<E: InterpolationEngine> TransitionController<E> {
    /// Creates an idle controller around `engine`.
    pub const fn new(engine: E) -> Self {
        Self {
            engine,
            active: None,
        }
    }

    /// The wrapped engine.
    pub const fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutable access to the wrapped engine, for host-side driving.
    pub const fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// `true` while a transition is live.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| active.status.get() == TransitionStatus::Running)
    }

    /// Starts a transition from the current transform to `mutator` applied
    /// to it.
    ///
    /// A running transition is interrupted first: its live value is read
    /// back and committed, and its handle settles as `Interrupted`, all
    /// strictly before the new engine run begins. The deferral used by
    /// [`interrupt`](Self::interrupt) does not apply here, because the new
    /// handle must be returned synchronously. If the live value cannot be
    /// read back, the superseded handle settles as `Cancelled` and the
    /// error is returned without starting a new run.
    pub fn animate(
        &mut self,
        state: &mut TransformState,
        mutator: impl FnOnce(Transform) -> Transform,
        duration: f64,
        easing: Easing,
    ) -> Result<TransitionHandle, TransitionError> {
        if self.is_animating() {
            self.interrupt_now(state)?;
        }
        let from = state.snapshot();
        let target = mutator(from);
        let status = Rc::new(Cell::new(TransitionStatus::Running));
        self.engine.begin(from, target, duration, easing);
        self.active = Some(ActiveTransition {
            target,
            status: status.clone(),
            pending_commit: None,
        });
        Ok(TransitionHandle { status })
    }

    /// Interrupts the transition behind `handle`, freezing the surface at
    /// its live value.
    ///
    /// The engine is paused immediately; the commit of the read-back value
    /// happens at the next [`on_frame`](Self::on_frame), after which the
    /// engine is cancelled and the handle settles as `Interrupted`. The
    /// frame of delay lets the paused value reach the paint sink before the
    /// engine's own output is torn down.
    pub fn interrupt(&mut self, handle: &TransitionHandle) -> Result<(), TransitionError> {
        self.live_transition_for(handle)?;
        self.engine.pause();
        let live = parse_matrix(&self.engine.current_value())?;
        if let Some(active) = self.active.as_mut() {
            active.pending_commit = Some(live);
        }
        Ok(())
    }

    /// Cancels the transition behind `handle`. Nothing is committed; the
    /// transform stays at its last committed value.
    pub fn cancel(&mut self, handle: &TransitionHandle) -> Result<(), TransitionError> {
        self.live_transition_for(handle)?;
        self.engine.cancel();
        if let Some(active) = self.active.take() {
            active.status.set(TransitionStatus::Cancelled);
        }
        Ok(())
    }

    /// Jumps the transition behind `handle` to its target and commits it.
    pub fn finish(
        &mut self,
        state: &mut TransformState,
        handle: &TransitionHandle,
    ) -> Result<(), TransitionError> {
        self.live_transition_for(handle)?;
        self.engine.finish();
        if let Some(active) = self.active.take() {
            state.commit(|_| active.target);
            active.status.set(TransitionStatus::Finished);
        }
        Ok(())
    }

    /// Performs frame-boundary work: pending interrupt commits and natural
    /// completion. Call once per paint frame.
    pub fn on_frame(&mut self, state: &mut TransformState) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        if let Some(live) = active.pending_commit.take() {
            state.commit(|_| live);
            self.engine.cancel();
            if let Some(active) = self.active.take() {
                active.status.set(TransitionStatus::Interrupted);
            }
            return;
        }
        if !self.engine.is_running() {
            if let Some(active) = self.active.take() {
                state.commit(|_| active.target);
                active.status.set(TransitionStatus::Finished);
            }
        }
    }

    /// Tears down any live transition as `Cancelled`. Used on disposal.
    pub fn shutdown(&mut self) {
        if let Some(active) = self.active.take() {
            if active.status.get() == TransitionStatus::Running {
                self.engine.cancel();
                active.status.set(TransitionStatus::Cancelled);
            }
        }
    }

    /// Synchronous interrupt used when a new `animate` supersedes a running
    /// transition.
    fn interrupt_now(&mut self, state: &mut TransformState) -> Result<(), TransitionError> {
        let Some(active) = self.active.take() else {
            return Ok(());
        };
        // A pending deferred interrupt already captured the live value;
        // otherwise read it back now.
        let live = match active.pending_commit {
            Some(live) => live,
            None => {
                self.engine.pause();
                match parse_matrix(&self.engine.current_value()) {
                    Ok(live) => live,
                    Err(err) => {
                        // No value to hand off; the superseded transition
                        // still settles instead of dangling as running.
                        self.engine.cancel();
                        active.status.set(TransitionStatus::Cancelled);
                        return Err(err.into());
                    }
                }
            }
        };
        state.commit(|_| live);
        self.engine.cancel();
        active.status.set(TransitionStatus::Interrupted);
        Ok(())
    }

    /// Checks that `handle` refers to the live, still-running transition.
    fn live_transition_for(&self, handle: &TransitionHandle) -> Result<(), TransitionError> {
        if handle.done() {
            return Err(TransitionError::AlreadySettled);
        }
        match self.active.as_ref() {
            Some(active) if Rc::ptr_eq(&active.status, &handle.status) => Ok(()),
            _ => Err(TransitionError::AlreadySettled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec::Vec;
    use glidepane_transform::encode_matrix;

    /// Test engine that exposes its call log and a scripted midpoint value.
    #[derive(Debug, Default)]
    struct FakeEngine {
        calls: Vec<&'static str>,
        running: bool,
        value: String,
    }

    impl FakeEngine {
        fn new() -> Self {
            Self {
                calls: Vec::new(),
                running: false,
                value: encode_matrix(&Transform::IDENTITY),
            }
        }

        /// Pretends the interpolation has advanced to `t`.
        fn advance_to(&mut self, t: Transform) {
            self.value = encode_matrix(&t);
        }

        fn complete(&mut self) {
            self.running = false;
        }
    }

    impl InterpolationEngine for FakeEngine {
        fn begin(&mut self, _from: Transform, to: Transform, _duration: f64, _easing: Easing) {
            self.calls.push("begin");
            self.running = true;
            self.value = encode_matrix(&to);
        }
        fn pause(&mut self) {
            self.calls.push("pause");
        }
        fn cancel(&mut self) {
            self.calls.push("cancel");
            self.running = false;
        }
        fn finish(&mut self) {
            self.calls.push("finish");
            self.running = false;
        }
        fn is_running(&self) -> bool {
            self.running
        }
        fn current_value(&self) -> String {
            self.value.clone()
        }
    }

    fn target(x: f64) -> impl FnOnce(Transform) -> Transform {
        move |t| Transform { x, ..t }
    }

    #[test]
    fn natural_completion_commits_the_target() {
        let mut state = TransformState::new();
        let mut controller = TransitionController::new(FakeEngine::new());
        let handle = controller
            .animate(&mut state, target(100.0), 200.0, Easing::default())
            .unwrap();
        assert!(controller.is_animating());
        assert_eq!(handle.status(), TransitionStatus::Running);

        // Engine still running: nothing settles.
        controller.on_frame(&mut state);
        assert!(!handle.done());

        controller.engine.complete();
        controller.on_frame(&mut state);
        assert_eq!(handle.status(), TransitionStatus::Finished);
        assert_eq!(state.snapshot().x, 100.0);
        assert!(!controller.is_animating());
    }

    #[test]
    fn interrupt_commits_the_live_value_one_frame_later() {
        let mut state = TransformState::new();
        let mut controller = TransitionController::new(FakeEngine::new());
        let handle = controller
            .animate(&mut state, target(100.0), 200.0, Easing::default())
            .unwrap();

        controller.engine.advance_to(Transform {
            x: 40.0,
            y: 0.0,
            zoom: 1.0,
        });
        controller.interrupt(&handle).unwrap();
        // Paused, but the commit waits for the frame boundary.
        assert_eq!(controller.engine.calls, alloc::vec!["begin", "pause"]);
        assert_eq!(state.snapshot().x, 0.0);
        assert!(!handle.done());

        controller.on_frame(&mut state);
        assert_eq!(state.snapshot().x, 40.0);
        assert_eq!(handle.status(), TransitionStatus::Interrupted);
        assert_eq!(
            controller.engine.calls,
            alloc::vec!["begin", "pause", "cancel"]
        );
    }

    #[test]
    fn second_animate_settles_the_first_handle_before_beginning() {
        let mut state = TransformState::new();
        let mut controller = TransitionController::new(FakeEngine::new());
        let first = controller
            .animate(&mut state, target(100.0), 200.0, Easing::default())
            .unwrap();
        controller.engine.advance_to(Transform {
            x: 25.0,
            y: 0.0,
            zoom: 1.0,
        });

        let second = controller
            .animate(&mut state, target(-60.0), 200.0, Easing::default())
            .unwrap();

        // The first handle settled during the `animate` call, before the
        // second engine run began (pause/cancel precede the second begin in
        // the engine log).
        assert_eq!(first.status(), TransitionStatus::Interrupted);
        assert_eq!(second.status(), TransitionStatus::Running);
        // The live value of the first transition was committed, and the
        // second runs from it.
        assert_eq!(state.snapshot().x, 25.0);
        assert_eq!(
            controller.engine.calls,
            alloc::vec!["begin", "pause", "cancel", "begin"]
        );
    }

    #[test]
    fn cancel_settles_without_committing() {
        let mut state = TransformState::new();
        let mut controller = TransitionController::new(FakeEngine::new());
        let handle = controller
            .animate(&mut state, target(100.0), 200.0, Easing::default())
            .unwrap();
        controller.cancel(&handle).unwrap();
        assert_eq!(handle.status(), TransitionStatus::Cancelled);
        assert_eq!(state.snapshot().x, 0.0);
        assert!(!controller.is_animating());
    }

    #[test]
    fn finish_jumps_to_the_target() {
        let mut state = TransformState::new();
        let mut controller = TransitionController::new(FakeEngine::new());
        let handle = controller
            .animate(&mut state, target(100.0), 200.0, Easing::default())
            .unwrap();
        controller.finish(&mut state, &handle).unwrap();
        assert_eq!(handle.status(), TransitionStatus::Finished);
        assert_eq!(state.snapshot().x, 100.0);
        assert!(controller.engine.calls.contains(&"finish"));
    }

    #[test]
    fn acting_on_a_settled_handle_errors() {
        let mut state = TransformState::new();
        let mut controller = TransitionController::new(FakeEngine::new());
        let handle = controller
            .animate(&mut state, target(100.0), 200.0, Easing::default())
            .unwrap();
        controller.cancel(&handle).unwrap();
        assert_eq!(
            controller.cancel(&handle),
            Err(TransitionError::AlreadySettled)
        );
        assert_eq!(
            controller.finish(&mut state, &handle),
            Err(TransitionError::AlreadySettled)
        );
        assert_eq!(
            controller.interrupt(&handle),
            Err(TransitionError::AlreadySettled)
        );
    }

    #[test]
    fn stale_handle_from_a_superseded_transition_errors() {
        let mut state = TransformState::new();
        let mut controller = TransitionController::new(FakeEngine::new());
        let first = controller
            .animate(&mut state, target(100.0), 200.0, Easing::default())
            .unwrap();
        let _second = controller
            .animate(&mut state, target(-100.0), 200.0, Easing::default())
            .unwrap();
        assert_eq!(
            controller.cancel(&first),
            Err(TransitionError::AlreadySettled)
        );
    }

    #[test]
    fn readback_failure_is_surfaced() {
        let mut state = TransformState::new();
        let mut controller = TransitionController::new(FakeEngine::new());
        let handle = controller
            .animate(&mut state, target(100.0), 200.0, Easing::default())
            .unwrap();
        controller.engine.value = "garbage".to_string();
        let err = controller.interrupt(&handle).unwrap_err();
        assert!(matches!(err, TransitionError::Readback(_)));
        assert!(err.to_string().contains("garbage"));
    }

    #[test]
    fn bad_readback_on_supersede_still_settles_the_old_handle() {
        let mut state = TransformState::new();
        let mut controller = TransitionController::new(FakeEngine::new());
        let first = controller
            .animate(&mut state, target(100.0), 200.0, Easing::default())
            .unwrap();
        controller.engine.value = "garbage".to_string();
        let err = controller
            .animate(&mut state, target(-100.0), 200.0, Easing::default())
            .unwrap_err();
        assert!(matches!(err, TransitionError::Readback(_)));
        // The superseded handle settles rather than dangling as running.
        assert!(first.done());
        assert_eq!(first.status(), TransitionStatus::Cancelled);
        assert!(!controller.is_animating());
        assert_eq!(state.snapshot().x, 0.0);
        // The controller recovers: a later animate starts cleanly.
        let next = controller
            .animate(&mut state, target(25.0), 200.0, Easing::default())
            .unwrap();
        assert_eq!(next.status(), TransitionStatus::Running);
    }

    #[test]
    fn shutdown_cancels_a_live_transition() {
        let mut state = TransformState::new();
        let mut controller = TransitionController::new(FakeEngine::new());
        let handle = controller
            .animate(&mut state, target(100.0), 200.0, Easing::default())
            .unwrap();
        controller.shutdown();
        assert_eq!(handle.status(), TransitionStatus::Cancelled);
        assert!(!controller.is_animating());
    }
}
