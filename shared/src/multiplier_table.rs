use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::{Result, WheelError};

/// Selects which payout distribution is on the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    fn index(self) -> usize {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum SegmentCount {
    Ten,
    Thirty,
    Fifty,
}

impl SegmentCount {
    pub const ALL: [SegmentCount; 3] = [Self::Ten, Self::Thirty, Self::Fifty];

    pub fn len(self) -> usize {
        match self {
            Self::Ten => 10,
            Self::Thirty => 30,
            Self::Fifty => 50,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Ten => 0,
            Self::Thirty => 1,
            Self::Fifty => 2,
        }
    }
}

impl TryFrom<usize> for SegmentCount {
    type Error = WheelError;

    fn try_from(count: usize) -> Result<Self> {
        match count {
            10 => Ok(Self::Ten),
            30 => Ok(Self::Thirty),
            50 => Ok(Self::Fifty),
            _ => Err(WheelError::InvalidSegmentCount { count }),
        }
    }
}

impl From<SegmentCount> for usize {
    fn from(segments: SegmentCount) -> usize {
        segments.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Gray,
    Green,
    Cyan,
    Yellow,
    Violet,
    Orange,
    Blue,
    Red,
}

// Every payout value the server can produce needs a bucket here
const PALETTE: [(f64, Color); 11] = [
    (0.0, Color::Gray),
    (1.5, Color::Green),
    (1.2, Color::Cyan),
    (1.7, Color::Cyan),
    (1.9, Color::Cyan),
    (2.0, Color::Yellow),
    (3.0, Color::Violet),
    (4.0, Color::Orange),
    (5.0, Color::Blue),
    (9.9, Color::Red),
    (49.5, Color::Red),
];

impl Color {
    pub fn for_multiplier(multiplier: f64) -> Option<Color> {
        PALETTE
            .iter()
            .find(|(value, _)| *value == multiplier)
            .map(|(_, color)| *color)
    }

    /// CSS color used when painting this bucket.
    pub fn hex(self) -> &'static str {
        match self {
            Self::Gray => "#808080",
            Self::Green => "#2ECC71",
            Self::Cyan => "#17A2B8",
            Self::Yellow => "#E1C875",
            Self::Violet => "#EE82EE",
            Self::Orange => "#FFA500",
            Self::Blue => "#0000FF",
            Self::Red => "#FF0000",
        }
    }
}

/// The payout multipliers printed on the wheel, clockwise from segment 0.
///
/// Values repeat; each index is one wedge. A sequence is never edited in
/// place, the active one is swapped wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct MultiplierSequence {
    values: Vec<f64>,
    colors: Vec<Color>,
}

impl MultiplierSequence {
    pub fn new(values: Vec<f64>) -> Result<Self> {
        SegmentCount::try_from(values.len())?;
        let colors = values
            .iter()
            .map(|&multiplier| {
                Color::for_multiplier(multiplier).ok_or(WheelError::UnknownMultiplier { multiplier })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { values, colors })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn segment_count(&self) -> SegmentCount {
        // Lengths are checked in `new`
        match self.values.len() {
            10 => SegmentCount::Ten,
            30 => SegmentCount::Thirty,
            _ => SegmentCount::Fifty,
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    pub fn color_at(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    /// Every index whose payout equals `multiplier` exactly.
    pub fn indices_of(&self, multiplier: f64) -> impl Iterator<Item = usize> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter(move |&(_, &value)| value == multiplier)
            .map(|(index, _)| index)
    }

    /// Distinct payouts in ascending order, for the legend.
    pub fn distinct_sorted(&self) -> Vec<f64> {
        let mut distinct = self.values.clone();
        distinct.sort_by(f64::total_cmp);
        distinct.dedup();
        distinct
    }
}

impl TryFrom<Vec<f64>> for MultiplierSequence {
    type Error = WheelError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::new(values)
    }
}

impl From<MultiplierSequence> for Vec<f64> {
    fn from(sequence: MultiplierSequence) -> Vec<f64> {
        sequence.values
    }
}

/// One wheel of a payout table as the server describes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableEntry {
    pub risk: RiskLevel,
    pub segments: SegmentCount,
    pub multipliers: Vec<f64>,
}

/// Every (risk, segments) wheel the product offers.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiplierTable {
    wheels: Vec<MultiplierSequence>,
}

impl MultiplierTable {
    /// Builds a table from server-provided entries.
    ///
    /// All nine combinations must be present and sized to match their
    /// segment count. A later entry for the same combination wins.
    pub fn from_entries(entries: Vec<TableEntry>) -> Result<Self> {
        let mut slots: Vec<Option<MultiplierSequence>> = vec![None; 9];
        for entry in entries {
            let sequence = MultiplierSequence::new(entry.multipliers)?;
            if sequence.segment_count() != entry.segments {
                return Err(WheelError::InvalidSegmentCount { count: sequence.len() });
            }
            slots[slot(entry.risk, entry.segments)] = Some(sequence);
        }

        let mut wheels = Vec::with_capacity(9);
        for risk in RiskLevel::iter() {
            for segments in SegmentCount::ALL {
                let sequence = slots[slot(risk, segments)]
                    .take()
                    .ok_or(WheelError::MissingTableEntry { risk, segments: segments.len() })?;
                wheels.push(sequence);
            }
        }
        Ok(Self { wheels })
    }

    pub fn lookup(&self, risk: RiskLevel, segments: SegmentCount) -> &MultiplierSequence {
        &self.wheels[slot(risk, segments)]
    }
}

impl Default for MultiplierTable {
    fn default() -> Self {
        BUILTIN_TABLE.clone()
    }
}

fn slot(risk: RiskLevel, segments: SegmentCount) -> usize {
    risk.index() * SegmentCount::ALL.len() + segments.index()
}

// Mirrors the server's payout table at the time of writing. Hosts that can
// fetch the live table should prefer `MultiplierTable::from_entries`.
const LOW_10: [f64; 10] = [1.5, 1.2, 1.2, 1.2, 0.0, 1.2, 1.2, 1.2, 1.2, 0.0];
const MEDIUM_10: [f64; 10] = [0.0, 1.9, 0.0, 1.5, 0.0, 2.0, 0.0, 1.5, 0.0, 3.0];
const MEDIUM_30: [f64; 30] = [
    0.0, 2.0, 0.0, 1.5, 0.0, 1.5, 0.0, 2.0, 0.0, 1.5, 0.0, 2.0, 0.0, 2.0, 0.0, 1.5, 0.0, 3.0, 0.0,
    1.5, 0.0, 2.0, 0.0, 2.0, 0.0, 1.7, 0.0, 4.0, 0.0, 1.5,
];
const MEDIUM_50: [f64; 50] = [
    0.0, 2.0, 0.0, 1.5, 0.0, 1.5, 0.0, 5.0, 0.0, 1.5, 0.0, 2.0, 0.0, 1.5, 0.0, 2.0, 0.0, 1.5, 0.0,
    2.0, 0.0, 1.5, 0.0, 3.0, 0.0, 1.5, 0.0, 1.5, 0.0, 2.0, 0.0, 1.5, 0.0, 3.0, 0.0, 1.5, 0.0, 2.0,
    0.0, 1.5, 0.0, 2.0, 0.0, 2.0, 0.0, 1.5, 0.0, 3.0, 0.0, 1.5,
];

fn high_wheel(len: usize, jackpot: f64) -> Vec<f64> {
    let mut values = vec![0.0; len];
    values[len - 1] = jackpot;
    values
}

fn builtin_entries() -> Vec<TableEntry> {
    let low = |segments: SegmentCount| TableEntry {
        risk: RiskLevel::Low,
        segments,
        multipliers: LOW_10.iter().copied().cycle().take(segments.len()).collect(),
    };
    vec![
        low(SegmentCount::Ten),
        low(SegmentCount::Thirty),
        low(SegmentCount::Fifty),
        TableEntry { risk: RiskLevel::Medium, segments: SegmentCount::Ten, multipliers: MEDIUM_10.to_vec() },
        TableEntry { risk: RiskLevel::Medium, segments: SegmentCount::Thirty, multipliers: MEDIUM_30.to_vec() },
        TableEntry { risk: RiskLevel::Medium, segments: SegmentCount::Fifty, multipliers: MEDIUM_50.to_vec() },
        TableEntry { risk: RiskLevel::High, segments: SegmentCount::Ten, multipliers: high_wheel(10, 9.9) },
        TableEntry { risk: RiskLevel::High, segments: SegmentCount::Thirty, multipliers: high_wheel(30, 9.9) },
        TableEntry { risk: RiskLevel::High, segments: SegmentCount::Fifty, multipliers: high_wheel(50, 49.5) },
    ]
}

static BUILTIN_TABLE: Lazy<MultiplierTable> = Lazy::new(|| {
    MultiplierTable::from_entries(builtin_entries()).expect("built-in payout table is complete")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_pure() {
        let table = MultiplierTable::default();
        for risk in RiskLevel::iter() {
            for segments in SegmentCount::ALL {
                let first = table.lookup(risk, segments).clone();
                let second = table.lookup(risk, segments);
                assert_eq!(&first, second);
                assert_eq!(first.len(), segments.len());
            }
        }
    }

    #[test]
    fn test_builtin_low_ten() {
        let table = MultiplierTable::default();
        let wheel = table.lookup(RiskLevel::Low, SegmentCount::Ten);
        assert_eq!(wheel.values(), &LOW_10[..]);
        assert_eq!(wheel.color_at(0), Some(Color::Green));
        assert_eq!(wheel.color_at(4), Some(Color::Gray));
    }

    #[test]
    fn test_builtin_high_jackpots() {
        let table = MultiplierTable::default();
        assert_eq!(table.lookup(RiskLevel::High, SegmentCount::Thirty).get(29), Some(9.9));
        assert_eq!(table.lookup(RiskLevel::High, SegmentCount::Fifty).get(49), Some(49.5));
        assert_eq!(table.lookup(RiskLevel::High, SegmentCount::Fifty).get(48), Some(0.0));
    }

    #[test]
    fn test_sequence_rejects_bad_length() {
        assert_eq!(
            MultiplierSequence::new(vec![0.0; 12]),
            Err(WheelError::InvalidSegmentCount { count: 12 })
        );
    }

    #[test]
    fn test_sequence_rejects_unknown_multiplier() {
        let mut values = LOW_10.to_vec();
        values[3] = 7.0;
        assert_eq!(
            MultiplierSequence::new(values),
            Err(WheelError::UnknownMultiplier { multiplier: 7.0 })
        );
    }

    #[test]
    fn test_from_entries_requires_every_wheel() {
        let mut entries = builtin_entries();
        entries.retain(|e| !(e.risk == RiskLevel::Medium && e.segments == SegmentCount::Fifty));
        assert_eq!(
            MultiplierTable::from_entries(entries),
            Err(WheelError::MissingTableEntry { risk: RiskLevel::Medium, segments: 50 })
        );
    }

    #[test]
    fn test_from_entries_rejects_mislabelled_wheel() {
        let mut entries = builtin_entries();
        entries[0].segments = SegmentCount::Thirty;
        assert!(matches!(
            MultiplierTable::from_entries(entries),
            Err(WheelError::InvalidSegmentCount { count: 10 })
        ));
    }

    #[test]
    fn test_distinct_sorted() {
        let table = MultiplierTable::default();
        let legend = table.lookup(RiskLevel::Medium, SegmentCount::Thirty).distinct_sorted();
        assert_eq!(legend, vec![0.0, 1.5, 1.7, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_risk_wire_format() {
        assert_eq!(serde_json::to_string(&RiskLevel::Medium).unwrap(), "\"MEDIUM\"");
        assert_eq!(RiskLevel::High.to_string(), "HIGH");
        let segments: SegmentCount = serde_json::from_str("30").unwrap();
        assert_eq!(segments, SegmentCount::Thirty);
        assert!(serde_json::from_str::<SegmentCount>("12").is_err());
    }
}
