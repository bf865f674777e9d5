use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, EnumString, IntoStaticStr};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ElementType {
    Fire,
    Water,
    Earth,
    Air,
    Spirit,
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key: &'static str = self.into();
        write!(f, "{}", key)
    }
}

/// Multiplier applied when an element hits the one it is strong against.
pub const SUPER_EFFECTIVE: f64 = 1.5;
/// Multiplier applied when an element hits the one it is weak against.
pub const NOT_VERY_EFFECTIVE: f64 = 0.75;
pub const NEUTRAL: f64 = 1.0;

/// One row of the element chart. Each element names exactly one element it is
/// strong against and one it is weak against; the chart is hand-authored and
/// does not have to be symmetric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementConfig {
    pub name: String,
    pub color: String,
    pub strong: ElementType,
    pub weak: ElementType,
}

impl ElementConfig {
    pub fn new(name: &str, color: &str, strong: ElementType, weak: ElementType) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
            strong,
            weak,
        }
    }

    /// Calculate the multiplier for an attack of this element against `defending`.
    /// Returns: 1.5 = Super Effective, 1.0 = Neutral, 0.75 = Not Very Effective
    ///
    /// A row that is both strong and weak against the same element (spirit against
    /// itself) cancels out to neutral.
    pub fn effectiveness_against(&self, defending: ElementType) -> f64 {
        match (self.strong == defending, self.weak == defending) {
            (true, true) => NEUTRAL,
            (true, false) => SUPER_EFFECTIVE,
            (false, true) => NOT_VERY_EFFECTIVE,
            (false, false) => NEUTRAL,
        }
    }
}
