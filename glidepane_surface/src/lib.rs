// Copyright 2026 the Glidepane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glidepane Surface: the assembled pan/zoom pipeline.
//!
//! A [`Surface`] wires the Glidepane crates together around three host
//! traits:
//! - [`GeometryProvider`] supplies the viewport and surface rects,
//! - [`PaintSink`] receives the serialized transform after every commit,
//! - [`InterpolationEngine`] (from `glidepane_transition`) animates.
//!
//! Every mutation, whatever its source, flows through one pipeline:
//! zoom-factor clamp, anchored-zoom correction, bounds clamp,
//! [`TransformState::commit`], paint. Gestures arrive either through the
//! `ui-events` adapter ([`Surface::handle_pointer_event`]) or through the
//! direct entry points (`pointer_down`/`pointer_move`/`pointer_up`,
//! `touch_start`/`touch_move`/`touch_end`, [`Surface::wheel_tick`]) for
//! hosts with their own event plumbing. The host calls
//! [`Surface::on_frame`] once per paint frame to drive kinetic coasting and
//! transition settlement.
//!
//! ## Example
//!
//! ```rust
//! use glidepane_surface::{GeometryProvider, PaintSink, Surface};
//! use glidepane_transform::{Transform, encode_matrix};
//! use glidepane_transition::{Easing, InterpolationEngine};
//! use kurbo::{Point, Rect};
//!
//! struct Geometry;
//! impl GeometryProvider for Geometry {
//!     fn viewport_rect(&self) -> Rect {
//!         Rect::new(0.0, 0.0, 800.0, 600.0)
//!     }
//!     fn surface_rect(&self) -> Rect {
//!         Rect::new(0.0, 0.0, 1600.0, 1200.0)
//!     }
//! }
//!
//! struct Paint;
//! impl PaintSink for Paint {
//!     fn apply_transform(&mut self, _matrix: &str) {}
//! }
//!
//! #[derive(Default)]
//! struct NoAnimation(String);
//! impl InterpolationEngine for NoAnimation {
//!     fn begin(&mut self, _f: Transform, to: Transform, _d: f64, _e: Easing) {
//!         self.0 = encode_matrix(&to);
//!     }
//!     fn pause(&mut self) {}
//!     fn cancel(&mut self) {}
//!     fn finish(&mut self) {}
//!     fn is_running(&self) -> bool {
//!         false
//!     }
//!     fn current_value(&self) -> String {
//!         self.0.clone()
//!     }
//! }
//!
//! let mut surface = Surface::new(Geometry, Paint, NoAnimation::default()).unwrap();
//! // One wheel tick toward the viewer, anchored at the viewport center.
//! surface.wheel_tick(-1.0, Point::new(400.0, 300.0));
//! assert!((surface.transform().zoom - 1.1).abs() < 1e-9);
//! ```

use kurbo::{Point, Rect, Vec2};
use ui_events::ScrollDelta;
use ui_events::pointer::{PointerButton, PointerEvent, PointerScrollEvent, PointerUpdate};

use glidepane_bounds::{BoundsConfig, ZoomLimits, clamp, clamp_zoom_factor};
use glidepane_gesture::{GestureSampler, PinchFrame, TouchRelease};
use glidepane_kinetic::{KineticEngine, KineticTick, VelocitySample};
use glidepane_transform::{
    Observers, SubscriberId, Transform, TransformState, anchor_correction, container_to_child,
    doc_to_container, encode_matrix,
};
use glidepane_transition::{
    Easing, InterpolationEngine, TransitionController, TransitionError, TransitionHandle,
};

pub use glidepane_bounds as bounds;
pub use glidepane_gesture as gesture;
pub use glidepane_kinetic as kinetic;
pub use glidepane_transform as transform;
pub use glidepane_transition as transition;

/// Pixels per scroll line, for hosts that deliver line-based wheel deltas.
const WHEEL_LINE_SIZE: f64 = 20.0;

/// Supplies the two rects the pipeline needs, in document coordinates.
///
/// Queried on every use, so live-resizing hosts just report their current
/// layout.
pub trait GeometryProvider {
    /// The viewport (container) rect the surface is panned within.
    fn viewport_rect(&self) -> Rect;
    /// The unscaled surface (content) rect.
    fn surface_rect(&self) -> Rect;
}

/// Receives the committed transform, serialized as `matrix(...)`.
pub trait PaintSink {
    /// Applies the transform to whatever the host paints.
    fn apply_transform(&mut self, matrix: &str);
}

/// Construction failures.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SurfaceError {
    /// The geometry provider reported a degenerate viewport rect (empty or
    /// non-finite). Nothing was constructed.
    InvalidContainer,
}

impl core::fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidContainer => write!(f, "viewport rect is empty or non-finite"),
        }
    }
}

impl core::error::Error for SurfaceError {}

/// Tunable behavior of a [`Surface`]. All fields may change at runtime.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SurfaceConfig {
    /// Zoom multiplier applied per wheel tick (inverted for the opposite
    /// direction).
    pub wheel_zoom_rate: f64,
    /// Zoom limits and the optional visibility margin.
    pub bounds: BoundsConfig,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            wheel_zoom_rate: 1.1,
            bounds: BoundsConfig::default(),
        }
    }
}

/// A pannable, zoomable surface inside a viewport.
///
/// See the crate docs for the pipeline. The surface is single-threaded and
/// host-driven; `now` timestamps are milliseconds on any monotonic clock.
#[derive(Debug)]
pub struct Surface<G, P, E>
where
    G: GeometryProvider,
    P: PaintSink,
    E: InterpolationEngine,
{
    geometry: G,
    paint: P,
    config: SurfaceConfig,
    state: TransformState,
    sampler: GestureSampler,
    kinetics: KineticEngine,
    transitions: TransitionController<E>,
    velocity_observers: Observers<Vec2>,
    disposed: bool,
}

impl<G, P, E> Surface<G, P, E>
where
    G: GeometryProvider,
    P: PaintSink,
    E: InterpolationEngine,
{
    /// Builds a surface over the given host pieces.
    ///
    /// Fails with [`SurfaceError::InvalidContainer`] when the viewport rect
    /// is degenerate; there is no partially constructed surface to clean
    /// up afterwards.
    pub fn new(geometry: G, paint: P, engine: E) -> Result<Self, SurfaceError> {
        let viewport = geometry.viewport_rect();
        let finite = viewport.x0.is_finite()
            && viewport.y0.is_finite()
            && viewport.x1.is_finite()
            && viewport.y1.is_finite();
        if !finite || viewport.width() <= 0.0 || viewport.height() <= 0.0 {
            return Err(SurfaceError::InvalidContainer);
        }
        Ok(Self {
            geometry,
            paint,
            config: SurfaceConfig::default(),
            state: TransformState::new(),
            sampler: GestureSampler::new(),
            kinetics: KineticEngine::new(),
            transitions: TransitionController::new(engine),
            velocity_observers: Observers::new(),
            disposed: false,
        })
    }

    /// The current configuration.
    #[must_use]
    pub const fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// Replaces the per-tick wheel zoom multiplier.
    pub fn set_wheel_zoom_rate(&mut self, rate: f64) {
        self.config.wheel_zoom_rate = rate;
    }

    /// Replaces the zoom limits. Applies from the next commit on; the
    /// current transform is not re-clamped retroactively.
    pub fn set_zoom_limits(&mut self, limits: ZoomLimits) {
        self.config.bounds.limits = limits;
    }

    /// Sets or clears the minimum-visible-margin constraint.
    pub fn set_visible_margin(&mut self, margin: Option<f64>) {
        self.config.bounds.visible_margin = margin;
    }

    /// Replaces the kinetic friction, in `0.0..=1.0`.
    pub fn set_friction(&mut self, friction: f64) {
        self.kinetics.friction = friction;
    }

    /// Replaces the speed below which coasting settles.
    pub fn set_min_velocity(&mut self, min_velocity: f64) {
        self.kinetics.min_velocity = min_velocity;
    }

    /// Resizes the velocity smoothing window, discarding buffered samples.
    pub fn set_smoothing_capacity(&mut self, capacity: usize) {
        self.kinetics.set_smoothing_capacity(capacity);
    }

    /// A copy of the committed transform.
    #[must_use]
    pub const fn transform(&self) -> Transform {
        self.state.snapshot()
    }

    /// `true` while a kinetic run is coasting.
    #[must_use]
    pub fn is_coasting(&self) -> bool {
        self.kinetics.is_coasting()
    }

    /// `true` while a transition is animating.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.transitions.is_animating()
    }

    /// Subscribes to committed transforms. Fires synchronously inside every
    /// commit.
    pub fn subscribe_transform(
        &mut self,
        callback: impl FnMut(&Transform) + 'static,
    ) -> SubscriberId {
        self.state.subscribe(callback)
    }

    /// Removes a transform subscription.
    pub fn unsubscribe_transform(&mut self, id: SubscriberId) -> bool {
        self.state.unsubscribe(id)
    }

    /// Subscribes to kinetic velocity. Fires once per coasting frame and a
    /// final time with `Vec2::ZERO` when the run settles, so subscribers
    /// can distinguish "moving" from "came to rest".
    pub fn subscribe_velocity(&mut self, callback: impl FnMut(&Vec2) + 'static) -> SubscriberId {
        self.velocity_observers.subscribe(callback)
    }

    /// Removes a velocity subscription.
    pub fn unsubscribe_velocity(&mut self, id: SubscriberId) -> bool {
        self.velocity_observers.unsubscribe(id)
    }

    /// Converts a document-space position into container space (origin at
    /// the viewport center).
    #[must_use]
    pub fn doc_to_container(&self, pos: Point) -> Point {
        doc_to_container(pos, self.geometry.viewport_rect())
    }

    /// Converts a container-space position into the child's local space.
    #[must_use]
    pub fn container_to_child(&self, pos: Point) -> Point {
        container_to_child(pos, &self.state.snapshot())
    }

    // --- ui-events adapter ---

    /// Feeds one `ui-events` pointer event.
    ///
    /// Returns `true` when the event drove the surface, in which case the
    /// host should suppress its default handling of the event.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent, now: f64) -> bool {
        if self.disposed {
            return false;
        }
        match event {
            PointerEvent::Down(e) => {
                // A buttonless press (touch, pen contact) counts as primary.
                let primary = e.button.is_none_or(|b| b == PointerButton::Primary);
                self.pointer_down(e.state.logical_point(), now, primary)
            }
            PointerEvent::Move(PointerUpdate { current, .. }) => {
                self.pointer_move(current.logical_point(), now)
            }
            PointerEvent::Up(e) => {
                // Only the primary button ends a drag; releasing a secondary
                // button mid-drag must not cut the gesture short.
                if e.button.is_none_or(|b| b == PointerButton::Primary) {
                    self.pointer_up()
                } else {
                    false
                }
            }
            PointerEvent::Cancel(_) => {
                // Platform took the pointer away: drop tracks, no coast.
                let was_active = self.sampler.is_panning() || self.sampler.is_pinching();
                self.sampler.reset();
                was_active
            }
            PointerEvent::Scroll(scroll) => {
                let delta = self.resolve_scroll_delta(scroll);
                if delta.y == 0.0 {
                    return false;
                }
                self.wheel_tick(delta.y, scroll.state.logical_point())
            }
            PointerEvent::Enter(_) | PointerEvent::Leave(_) | PointerEvent::Gesture(_) => false,
        }
    }

    fn resolve_scroll_delta(&self, event: &PointerScrollEvent) -> Vec2 {
        match &event.delta {
            ScrollDelta::PixelDelta(pos) => {
                let logical = pos.to_logical(event.state.scale_factor);
                Vec2::new(logical.x, logical.y)
            }
            ScrollDelta::LineDelta(x, y) => Vec2::new(
                f64::from(*x) * WHEEL_LINE_SIZE,
                f64::from(*y) * WHEEL_LINE_SIZE,
            ),
            ScrollDelta::PageDelta(x, y) => {
                let viewport = self.geometry.viewport_rect();
                Vec2::new(
                    f64::from(*x) * viewport.width(),
                    f64::from(*y) * viewport.height(),
                )
            }
        }
    }

    // --- direct gesture entry points ---

    /// Starts a drag. Any kinetic coast is cancelled first; a drag and a
    /// coast never move the surface in the same frame.
    pub fn pointer_down(&mut self, pos: Point, now: f64, primary: bool) -> bool {
        if self.disposed {
            return false;
        }
        if self.sampler.pointer_down(pos, now, primary) {
            self.kinetics.stop();
            true
        } else {
            false
        }
    }

    /// Advances a live drag, committing the pan.
    pub fn pointer_move(&mut self, pos: Point, now: f64) -> bool {
        if self.disposed {
            return false;
        }
        let Some(frame) = self.sampler.pointer_move(pos, now) else {
            return false;
        };
        self.apply_pan(frame.delta, frame.dt);
        true
    }

    /// Ends a live drag and starts the kinetic coast from the sampled
    /// velocity.
    pub fn pointer_up(&mut self) -> bool {
        if self.disposed || !self.sampler.pointer_up() {
            return false;
        }
        self.kinetics.start();
        true
    }

    /// Starts a multi-contact gesture with the full current contact set.
    pub fn touch_start(&mut self, contacts: &[Point], now: f64) {
        if self.disposed {
            return;
        }
        self.kinetics.stop();
        self.sampler.touch_start(contacts, now);
    }

    /// Advances a live multi-contact gesture, committing pan and zoom.
    pub fn touch_move(&mut self, contacts: &[Point], now: f64) -> bool {
        if self.disposed {
            return false;
        }
        let Some(frame) = self.sampler.touch_move(contacts, now) else {
            return false;
        };
        self.apply_pinch(frame);
        true
    }

    /// Feeds a contact lift. When the last contact lifts, the final frame
    /// is replayed so the release contributes a velocity sample, then the
    /// kinetic coast starts.
    pub fn touch_end(&mut self, remaining: &[Point]) -> bool {
        if self.disposed {
            return false;
        }
        match self.sampler.touch_end(remaining) {
            TouchRelease::Inactive => false,
            TouchRelease::Continuing => true,
            TouchRelease::Ended(replay) => {
                if let Some(frame) = replay {
                    self.apply_pinch(frame);
                }
                self.kinetics.start();
                true
            }
        }
    }

    /// Applies one wheel tick anchored at `anchor` (document coordinates).
    ///
    /// DOM sign convention: `delta_y < 0` zooms in by
    /// [`SurfaceConfig::wheel_zoom_rate`], `delta_y > 0` zooms out by its
    /// inverse. The magnitude is ignored; a tick is a tick.
    pub fn wheel_tick(&mut self, delta_y: f64, anchor: Point) -> bool {
        if self.disposed || delta_y == 0.0 {
            return false;
        }
        let rate = self.config.wheel_zoom_rate;
        let requested = if delta_y < 0.0 { rate } else { 1.0 / rate };
        self.zoom_about(requested, anchor);
        true
    }

    /// Zooms by `factor` keeping the document-space `anchor` visually
    /// fixed, subject to the zoom limits.
    pub fn zoom_about(&mut self, factor: f64, anchor: Point) -> Transform {
        let current = self.state.snapshot();
        let factor = clamp_zoom_factor(factor, current.zoom, &self.config.bounds.limits);
        let anchor_child = self.container_to_child(self.doc_to_container(anchor));
        let err = anchor_correction(anchor_child.to_vec2(), factor);
        self.commit_clamped(move |t| Transform {
            x: t.x - err.x,
            y: t.y - err.y,
            zoom: t.zoom * factor,
        })
    }

    /// Commits an arbitrary mutation through the clamp pipeline.
    pub fn edit(&mut self, mutator: impl FnOnce(Transform) -> Transform) -> Transform {
        self.commit_clamped(mutator)
    }

    // --- transitions ---

    /// Animates from the current transform to `mutator` applied to it.
    ///
    /// The target is clamped through the same bounds as direct edits. A
    /// running transition is interrupted (its live value committed, its
    /// handle settled) strictly before this one begins.
    pub fn animate(
        &mut self,
        mutator: impl FnOnce(Transform) -> Transform,
        duration: f64,
        easing: Easing,
    ) -> Result<TransitionHandle, TransitionError> {
        self.kinetics.stop();
        let surface_rect = self.geometry.surface_rect();
        let viewport_rect = self.geometry.viewport_rect();
        let bounds = self.config.bounds;
        let handle = self.transitions.animate(
            &mut self.state,
            move |t| clamp(mutator(t), surface_rect, viewport_rect, &bounds),
            duration,
            easing,
        )?;
        // A superseded transition may have committed its live value.
        self.sync_paint();
        Ok(handle)
    }

    /// Freezes the transition behind `handle` at its live value; the value
    /// commits at the next [`on_frame`](Self::on_frame).
    pub fn interrupt(&mut self, handle: &TransitionHandle) -> Result<(), TransitionError> {
        self.transitions.interrupt(handle)
    }

    /// Cancels the transition behind `handle` without committing.
    pub fn cancel(&mut self, handle: &TransitionHandle) -> Result<(), TransitionError> {
        self.transitions.cancel(handle)
    }

    /// Jumps the transition behind `handle` to its target.
    pub fn finish(&mut self, handle: &TransitionHandle) -> Result<(), TransitionError> {
        self.transitions.finish(&mut self.state, handle)?;
        self.sync_paint();
        Ok(())
    }

    // --- frame driving ---

    /// Advances frame-paced work: kinetic coasting and transition
    /// settlement. Call once per paint frame with a monotonic timestamp in
    /// milliseconds.
    pub fn on_frame(&mut self, now: f64) {
        if self.disposed {
            return;
        }
        match self.kinetics.on_frame(now) {
            KineticTick::Idle => {}
            KineticTick::Coasting(velocity) => {
                self.commit_clamped(move |t| t.translated(velocity));
                self.velocity_observers.notify(&velocity);
            }
            KineticTick::Settled => {
                self.velocity_observers.notify(&Vec2::ZERO);
            }
        }

        let before = self.state.snapshot();
        self.transitions.on_frame(&mut self.state);
        if self.state.snapshot() != before {
            self.sync_paint();
        }
    }

    /// Tears the surface down: halts kinetics and transitions and drops
    /// every subscription. Further input and frames are ignored.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.sampler.reset();
        self.kinetics.stop();
        self.transitions.shutdown();
        self.state.clear_subscribers();
        self.velocity_observers.clear();
    }

    // --- pipeline ---

    fn apply_pan(&mut self, delta: Vec2, dt: f64) {
        self.kinetics.push_sample(VelocitySample {
            dx: delta.x,
            dy: delta.y,
            dt,
        });
        self.commit_clamped(move |t| t.translated(delta));
    }

    fn apply_pinch(&mut self, frame: PinchFrame) {
        let current = self.state.snapshot();
        let factor = clamp_zoom_factor(frame.factor, current.zoom, &self.config.bounds.limits);
        let anchor_child = self.container_to_child(self.doc_to_container(frame.anchor));
        let err = anchor_correction(anchor_child.to_vec2(), factor);
        let delta = frame.delta - err;
        // The velocity sample carries the anchored delta so the coast
        // continues the on-screen motion, not the raw centroid motion.
        self.kinetics.push_sample(VelocitySample {
            dx: delta.x,
            dy: delta.y,
            dt: frame.dt,
        });
        self.commit_clamped(move |t| Transform {
            x: t.x + delta.x,
            y: t.y + delta.y,
            zoom: t.zoom * factor,
        });
    }

    fn commit_clamped(&mut self, mutator: impl FnOnce(Transform) -> Transform) -> Transform {
        let surface_rect = self.geometry.surface_rect();
        let viewport_rect = self.geometry.viewport_rect();
        let bounds = self.config.bounds;
        let next = self
            .state
            .commit(move |t| clamp(mutator(t), surface_rect, viewport_rect, &bounds));
        self.paint.apply_transform(&encode_matrix(&next));
        next
    }

    fn sync_paint(&mut self) {
        let current = self.state.snapshot();
        self.paint.apply_transform(&encode_matrix(&current));
    }
}
