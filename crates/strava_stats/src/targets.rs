//! Canonical race distances a personal best is tracked for.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TargetDistance {
    Marathon,
    HalfMarathon,
    TenK,
    FiveK,
    Mile,
    OneK,
}

impl TargetDistance {
    /// Render order of the statistics section, longest first.
    pub const ALL: [TargetDistance; 6] = [
        TargetDistance::Marathon,
        TargetDistance::HalfMarathon,
        TargetDistance::TenK,
        TargetDistance::FiveK,
        TargetDistance::Mile,
        TargetDistance::OneK,
    ];

    pub fn meters(self) -> f64 {
        match self {
            TargetDistance::Marathon => 42_195.0,
            TargetDistance::HalfMarathon => 21_097.5,
            TargetDistance::TenK => 10_000.0,
            TargetDistance::FiveK => 5_000.0,
            TargetDistance::Mile => 1_609.34,
            TargetDistance::OneK => 1_000.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TargetDistance::Marathon => "Marathon",
            TargetDistance::HalfMarathon => "Half-Marathon",
            TargetDistance::TenK => "10K",
            TargetDistance::FiveK => "5K",
            TargetDistance::Mile => "1 Mile",
            TargetDistance::OneK => "1K",
        }
    }

    /// An activity counts toward this target once it covers at least the full distance.
    pub fn is_covered_by(self, distance_m: f64) -> bool {
        distance_m >= self.meters()
    }
}

impl fmt::Display for TargetDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
