use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::WheelConfig;
use crate::error::Result;
use crate::multiplier_table::{MultiplierSequence, MultiplierTable, RiskLevel, SegmentCount};
use crate::result_reveal::ResultDisplay;
use crate::segment_selector::select_index;
use crate::spin_controller::{SpinController, SpinHandle, SpinState};
use crate::surface::WheelSurface;

/// The wheel as the host UI sees it: pick a wheel, spin to a payout, watch it land.
///
/// Owns the payout table, the spin controller and the random source used to
/// break ties between equal wedges. All methods take `&mut self`, so a
/// reconfiguration can never interleave with a tick.
pub struct WheelGame<S, R> {
    table: MultiplierTable,
    risk: RiskLevel,
    segments: SegmentCount,
    controller: SpinController<S>,
    rng: R,
}

impl<S: WheelSurface, R: Rng> WheelGame<S, R> {
    pub fn new(
        table: MultiplierTable,
        risk: RiskLevel,
        segments: SegmentCount,
        surface: S,
        rng: R,
        config: WheelConfig,
    ) -> Self {
        let sequence = table.lookup(risk, segments).clone();
        Self {
            controller: SpinController::new(sequence, surface, config),
            table,
            risk,
            segments,
            rng,
        }
    }

    pub fn risk(&self) -> RiskLevel {
        self.risk
    }

    pub fn segments(&self) -> SegmentCount {
        self.segments
    }

    pub fn multipliers(&self) -> &MultiplierSequence {
        self.controller.sequence()
    }

    pub fn state(&self) -> SpinState {
        self.controller.state()
    }

    pub fn is_spinning(&self) -> bool {
        self.controller.is_spinning()
    }

    pub fn current_result(&self) -> Option<ResultDisplay> {
        self.controller.current_result()
    }

    pub fn controller(&self) -> &SpinController<S> {
        &self.controller
    }

    pub fn surface(&self) -> &S {
        self.controller.surface()
    }

    pub fn surface_mut(&mut self) -> &mut S {
        self.controller.surface_mut()
    }

    /// Switches to another wheel. Fails while spinning and leaves the current wheel in place.
    pub fn set_risk_and_segments(&mut self, risk: RiskLevel, segments: SegmentCount) -> Result<()> {
        let sequence = self.table.lookup(risk, segments).clone();
        self.controller.reconfigure(sequence)?;
        self.risk = risk;
        self.segments = segments;
        Ok(())
    }

    /// Installs a payout table received from the server and redraws the current wheel from it.
    pub fn replace_table(&mut self, table: MultiplierTable) -> Result<()> {
        let sequence = table.lookup(self.risk, self.segments).clone();
        self.controller.reconfigure(sequence)?;
        self.table = table;
        Ok(())
    }

    /// Spins to a wedge paying `target_multiplier`.
    ///
    /// While a spin is in flight this returns that spin's handle untouched.
    /// A payout that is not on the wheel fails without moving it.
    pub fn spin_to(&mut self, target_multiplier: f64) -> Result<SpinHandle> {
        if let Some(handle) = self.controller.in_flight() {
            return Ok(handle);
        }
        let index = select_index(self.controller.sequence(), target_multiplier, &mut self.rng)?;
        self.controller.spin(index)
    }

    pub fn tick(&mut self, delta: Duration) {
        self.controller.tick(delta);
    }

    pub fn dismiss_result(&mut self) {
        self.controller.dismiss_result();
    }
}

// === API Types ===

/// What the bet submission service needs to settle one wager.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WheelBetRequest {
    /// Base units of `currency`.
    pub wager: f64,
    pub currency: String,
    pub risk: RiskLevel,
    pub segments: SegmentCount,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WheelBetResponse {
    pub multiplier: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WheelError;
    use crate::surface::RecordingSurface;
    use futures::executor::block_on;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn game() -> WheelGame<RecordingSurface, StdRng> {
        WheelGame::new(
            MultiplierTable::default(),
            RiskLevel::Medium,
            SegmentCount::Thirty,
            RecordingSurface::new(),
            StdRng::seed_from_u64(5),
            WheelConfig::default(),
        )
    }

    #[test]
    fn test_reconfigure_when_idle() {
        let mut game = game();
        game.set_risk_and_segments(RiskLevel::High, SegmentCount::Fifty).unwrap();
        assert_eq!(game.risk(), RiskLevel::High);
        assert_eq!(game.segments(), SegmentCount::Fifty);
        assert_eq!(game.multipliers().len(), 50);
    }

    #[test]
    fn test_reconfigure_rejected_mid_spin() {
        let mut game = game();
        let before = game.multipliers().clone();
        game.spin_to(4.0).unwrap();
        assert_eq!(
            game.set_risk_and_segments(RiskLevel::Low, SegmentCount::Ten),
            Err(WheelError::ReconfigurationWhileSpinning)
        );
        assert_eq!(game.risk(), RiskLevel::Medium);
        assert_eq!(game.segments(), SegmentCount::Thirty);
        assert_eq!(game.multipliers(), &before);
    }

    #[test]
    fn test_spin_to_jackpot_wedge() {
        let mut game = game();
        let handle = game.spin_to(4.0).unwrap();
        game.tick(Duration::from_millis(1000));
        let outcome = block_on(handle).unwrap();
        // only one 4x wedge on the medium 30 wheel
        assert_eq!(outcome.index, 27);
    }

    #[test]
    fn test_unknown_payout_does_not_spin() {
        let mut game = game();
        assert_eq!(
            game.spin_to(9.9).unwrap_err(),
            WheelError::NoMatchingSegment { multiplier: 9.9 }
        );
        assert_eq!(game.state(), SpinState::Idle);
    }

    #[test]
    fn test_spin_to_while_spinning_reuses_handle() {
        let mut game = game();
        let first = game.spin_to(3.0).unwrap();
        // not on this wheel, but the spin in flight wins
        let second = game.spin_to(123.0).unwrap();
        game.tick(Duration::from_millis(1000));
        assert_eq!(block_on(first).unwrap(), block_on(second).unwrap());
    }

    #[test]
    fn test_bet_request_wire_format() {
        let request = WheelBetRequest {
            wager: 150.0,
            currency: "BTC".to_string(),
            risk: RiskLevel::Low,
            segments: SegmentCount::Fifty,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"wager": 150.0, "currency": "BTC", "risk": "LOW", "segments": 50})
        );
    }
}
