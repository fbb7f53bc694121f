use serde::{Deserialize, Serialize};

use crate::multiplier_table::MultiplierSequence;
use crate::result_reveal::ResultDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sound {
    Bet,
    Win,
}

impl Sound {
    pub fn asset_path(self) -> &'static str {
        match self {
            Self::Bet => "/bet.mp3",
            Self::Win => "/win.mp3",
        }
    }
}

/// Where the wheel core sends sound and pixels.
///
/// Calls are fire-and-forget; the core never waits on the host.
pub trait WheelSurface {
    fn play_sound(&mut self, sound: Sound);
    fn draw_segments(&mut self, sequence: &MultiplierSequence);
    fn set_rotation(&mut self, angle: f64);
    fn set_pointer_deflected(&mut self, deflected: bool);
    fn draw_result(&mut self, result: Option<&ResultDisplay>, scale: f64);
}

/// One call made on a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Sound(Sound),
    Segments(Vec<f64>),
    Rotation(f64),
    Pointer(bool),
    Result(Option<ResultDisplay>),
}

/// Headless surface that keeps an ordered log of every call.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    pub events: Vec<SurfaceEvent>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sounds(&self) -> Vec<Sound> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SurfaceEvent::Sound(sound) => Some(*sound),
                _ => None,
            })
            .collect()
    }

    pub fn last_rotation(&self) -> Option<f64> {
        self.events.iter().rev().find_map(|event| match event {
            SurfaceEvent::Rotation(angle) => Some(*angle),
            _ => None,
        })
    }

    pub fn position(&self, wanted: &SurfaceEvent) -> Option<usize> {
        self.events.iter().position(|event| event == wanted)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl WheelSurface for RecordingSurface {
    fn play_sound(&mut self, sound: Sound) {
        self.events.push(SurfaceEvent::Sound(sound));
    }

    fn draw_segments(&mut self, sequence: &MultiplierSequence) {
        self.events.push(SurfaceEvent::Segments(sequence.values().to_vec()));
    }

    fn set_rotation(&mut self, angle: f64) {
        self.events.push(SurfaceEvent::Rotation(angle));
    }

    fn set_pointer_deflected(&mut self, deflected: bool) {
        self.events.push(SurfaceEvent::Pointer(deflected));
    }

    fn draw_result(&mut self, result: Option<&ResultDisplay>, _scale: f64) {
        self.events.push(SurfaceEvent::Result(result.copied()));
    }
}
