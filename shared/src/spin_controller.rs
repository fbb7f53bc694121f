use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::channel::oneshot;
use futures::future::{FutureExt, Shared};
use serde::{Deserialize, Serialize};

use crate::config::WheelConfig;
use crate::error::{Result, WheelError};
use crate::multiplier_table::{Color, MultiplierSequence};
use crate::result_reveal::{ResultDisplay, ResultReveal};
use crate::spin_animator::{landing_angle, Advance, RotationState};
use crate::surface::{Sound, WheelSurface};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpinState {
    Idle,
    Spinning,
}

/// Where a spin stopped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinOutcome {
    pub index: usize,
    pub multiplier: f64,
    pub color: Color,
    pub angle: f64,
}

/// Resolves once, when the spin it was issued for lands.
///
/// Every caller that asks for a spin while one is in flight gets a clone of
/// the same handle.
#[derive(Clone)]
pub struct SpinHandle {
    inner: Shared<oneshot::Receiver<SpinOutcome>>,
}

impl fmt::Debug for SpinHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpinHandle").finish_non_exhaustive()
    }
}

impl SpinHandle {
    fn new(receiver: oneshot::Receiver<SpinOutcome>) -> Self {
        Self { inner: receiver.shared() }
    }
}

impl Future for SpinHandle {
    type Output = Result<SpinOutcome>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.inner)
            .poll(cx)
            .map(|outcome| outcome.map_err(|_| WheelError::SpinAbandoned))
    }
}

enum Phase {
    Idle,
    Spinning {
        rotation: RotationState,
        index: usize,
        done: oneshot::Sender<SpinOutcome>,
        handle: SpinHandle,
    },
}

/// Drives one wheel through `Idle -> Spinning -> Idle`.
///
/// Everything happens on the caller's thread: `spin` starts a rotation,
/// `tick` moves it along, and the landing side effects (snap, win sound,
/// result reveal) all run inside the `tick` that crosses the spin duration.
pub struct SpinController<S> {
    config: WheelConfig,
    surface: S,
    sequence: MultiplierSequence,
    angle: f64,
    phase: Phase,
    reveal: ResultReveal,
}

impl<S: WheelSurface> SpinController<S> {
    pub fn new(sequence: MultiplierSequence, mut surface: S, config: WheelConfig) -> Self {
        // Rest with segment 0 under the pointer
        let angle = landing_angle(0, sequence.len(), config.pointer_angle);
        surface.draw_segments(&sequence);
        surface.set_rotation(angle);
        surface.set_pointer_deflected(false);
        Self {
            reveal: ResultReveal::new(&config),
            config,
            surface,
            sequence,
            angle,
            phase: Phase::Idle,
        }
    }

    pub fn state(&self) -> SpinState {
        match self.phase {
            Phase::Idle => SpinState::Idle,
            Phase::Spinning { .. } => SpinState::Spinning,
        }
    }

    pub fn is_spinning(&self) -> bool {
        self.state() == SpinState::Spinning
    }

    /// Handle of the spin in flight, if any.
    pub fn in_flight(&self) -> Option<SpinHandle> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Spinning { handle, .. } => Some(handle.clone()),
        }
    }

    pub fn sequence(&self) -> &MultiplierSequence {
        &self.sequence
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    pub fn current_result(&self) -> Option<ResultDisplay> {
        self.reveal.current()
    }

    pub fn reveal_scale(&self) -> f64 {
        self.reveal.scale()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Starts spinning toward `index`, or joins the spin already in flight.
    pub fn spin(&mut self, index: usize) -> Result<SpinHandle> {
        if let Some(handle) = self.in_flight() {
            log::debug!("spin to {} coalesced onto the spin in flight", index);
            return Ok(handle);
        }
        if index >= self.sequence.len() {
            return Err(WheelError::IndexOutOfRange { index, len: self.sequence.len() });
        }

        self.surface.play_sound(Sound::Bet);
        self.reveal.hide();
        self.redraw_result();
        self.surface.set_pointer_deflected(true);

        let rotation = RotationState::begin(self.angle, index, self.sequence.len(), &self.config);
        log::debug!(
            "spinning to segment {} ({} rad -> {} rad)",
            index,
            rotation.start_angle(),
            rotation.target_angle()
        );

        let (done, receiver) = oneshot::channel();
        let handle = SpinHandle::new(receiver);
        self.phase = Phase::Spinning { rotation, index, done, handle: handle.clone() };
        Ok(handle)
    }

    /// Advances time by one frame.
    pub fn tick(&mut self, delta: Duration) {
        if self.reveal.advance(delta) {
            self.redraw_result();
        }

        let Phase::Spinning { rotation, index, done, handle } =
            std::mem::replace(&mut self.phase, Phase::Idle)
        else {
            return;
        };

        match rotation.advance(delta) {
            Advance::Turning(rotation) => {
                self.angle = rotation.angle();
                self.surface.set_rotation(self.angle);
                self.phase = Phase::Spinning { rotation, index, done, handle };
            }
            Advance::Landed { angle } => {
                let outcome = self.land(index, angle);
                // Nobody may be listening any more
                let _ = done.send(outcome);
            }
        }
    }

    /// Clears the result shown in the middle of the wheel.
    pub fn dismiss_result(&mut self) {
        self.reveal.hide();
        self.redraw_result();
    }

    /// Swaps the wheel's multipliers. Refused while a spin is in flight.
    pub fn reconfigure(&mut self, sequence: MultiplierSequence) -> Result<()> {
        if self.is_spinning() {
            log::warn!("rejected wheel reconfiguration during a spin");
            return Err(WheelError::ReconfigurationWhileSpinning);
        }
        log::debug!("wheel reconfigured to {} segments", sequence.len());
        self.sequence = sequence;
        self.surface.draw_segments(&self.sequence);
        self.reveal.hide();
        self.redraw_result();
        Ok(())
    }

    fn land(&mut self, index: usize, angle: f64) -> SpinOutcome {
        self.angle = angle;
        self.surface.set_rotation(angle);
        self.surface.set_pointer_deflected(false);

        // Both were fixed when the spin started, and the sequence cannot change mid-spin
        let multiplier = self.sequence.get(index).unwrap_or_default();
        let color = self.sequence.color_at(index).unwrap_or(Color::Gray);
        if multiplier > 0.0 {
            self.surface.play_sound(Sound::Win);
        }
        self.reveal.show(multiplier, color);
        self.redraw_result();
        log::debug!("landed on segment {} ({}x)", index, multiplier);

        SpinOutcome { index, multiplier, color, angle }
    }

    fn redraw_result(&mut self) {
        let shown = self.reveal.current().filter(|display| display.visible);
        self.surface.draw_result(shown.as_ref(), self.reveal.scale());
    }
}
