use std::f64::consts::TAU;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::WheelConfig;
use crate::multiplier_table::Color;

/// What the center of the wheel shows after a spin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResultDisplay {
    pub multiplier: f64,
    pub color: Color,
    pub visible: bool,
}

impl ResultDisplay {
    pub fn label(&self) -> String {
        format!("{:.2}x", self.multiplier)
    }
}

/// Overshooting ease: springs past 1 and settles back.
pub fn elastic_out(t: f64, amplitude: f64, period: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let s = period / TAU * (1.0 / amplitude).asin();
    amplitude * 2f64.powf(-10.0 * t) * ((t - s) * TAU / period).sin() + 1.0
}

/// Pop-in animation for the landed multiplier.
#[derive(Debug, Clone)]
pub struct ResultReveal {
    display: Option<ResultDisplay>,
    scale: f64,
    // Some while the pop-in is playing
    elapsed: Option<Duration>,
    duration: Duration,
    amplitude: f64,
    period: f64,
}

impl ResultReveal {
    pub fn new(config: &WheelConfig) -> Self {
        Self {
            display: None,
            scale: 0.0,
            elapsed: None,
            duration: config.reveal_duration(),
            amplitude: config.reveal_amplitude,
            period: config.reveal_period,
        }
    }

    pub fn show(&mut self, multiplier: f64, color: Color) {
        self.display = Some(ResultDisplay { multiplier, color, visible: true });
        self.scale = 0.0;
        self.elapsed = Some(Duration::ZERO);
    }

    pub fn hide(&mut self) {
        if let Some(display) = self.display.as_mut() {
            display.visible = false;
        }
        self.scale = 0.0;
        self.elapsed = None;
    }

    pub fn current(&self) -> Option<ResultDisplay> {
        self.display
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn is_animating(&self) -> bool {
        self.elapsed.is_some()
    }

    /// Returns true if the scale changed.
    pub fn advance(&mut self, delta: Duration) -> bool {
        let Some(elapsed) = self.elapsed else {
            return false;
        };
        let elapsed = elapsed.saturating_add(delta);
        if elapsed >= self.duration {
            self.scale = 1.0;
            self.elapsed = None;
        } else {
            let progress = elapsed.as_secs_f64() / self.duration.as_secs_f64();
            self.scale = elastic_out(progress, self.amplitude, self.period);
            self.elapsed = Some(elapsed);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elastic_out_overshoots_then_settles() {
        assert_eq!(elastic_out(0.0, 1.05, 0.5), 0.0);
        assert_eq!(elastic_out(1.0, 1.05, 0.5), 1.0);
        let peak = (1..100)
            .map(|i| elastic_out(i as f64 / 100.0, 1.05, 0.5))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);
        assert!((elastic_out(0.99, 1.05, 0.5) - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_show_pops_in_over_duration() {
        let mut reveal = ResultReveal::new(&WheelConfig::default());
        reveal.show(1.2, Color::Cyan);
        assert_eq!(reveal.scale(), 0.0);
        assert!(reveal.is_animating());
        assert!(reveal.advance(Duration::from_millis(100)));
        assert!(reveal.scale() > 0.0);
        assert!(reveal.advance(Duration::from_millis(400)));
        assert_eq!(reveal.scale(), 1.0);
        assert!(!reveal.is_animating());
        assert!(!reveal.advance(Duration::from_millis(16)));
        assert_eq!(
            reveal.current(),
            Some(ResultDisplay { multiplier: 1.2, color: Color::Cyan, visible: true })
        );
    }

    #[test]
    fn test_hide_is_instant() {
        let mut reveal = ResultReveal::new(&WheelConfig::default());
        reveal.show(3.0, Color::Violet);
        reveal.advance(Duration::from_millis(250));
        reveal.hide();
        assert_eq!(reveal.scale(), 0.0);
        assert!(!reveal.is_animating());
        assert_eq!(reveal.current().map(|d| d.visible), Some(false));
    }

    #[test]
    fn test_label_format() {
        let display = ResultDisplay { multiplier: 1.5, color: Color::Green, visible: true };
        assert_eq!(display.label(), "1.50x");
    }
}
