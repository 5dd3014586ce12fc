use strum_macros::{Display, EnumIter};

/// Discrete heatmap intensity of a slot relative to the number of participants.
#[derive(Debug, Display, EnumIter, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeatLevel {
    None,
    Low,
    Medium,
    High,
    Full,
}

impl HeatLevel {
    /// Buckets `count / max` into `(0, .25]`, `(.25, .5]`, `(.5, .75]` and `(.75, 1]`.
    ///
    /// Zero counts and a non-positive `max` both map to [`HeatLevel::None`],
    /// counts above `max` saturate at [`HeatLevel::Full`].
    #[allow(clippy::cast_precision_loss)]
    pub fn classify(count: usize, max: usize) -> Self {
        if count == 0 || max == 0 {
            return HeatLevel::None;
        }
        let intensity = count as f64 / max as f64;
        if intensity <= 0.25 {
            HeatLevel::Low
        } else if intensity <= 0.5 {
            HeatLevel::Medium
        } else if intensity <= 0.75 {
            HeatLevel::High
        } else {
            HeatLevel::Full
        }
    }
}
