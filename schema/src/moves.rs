use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, EnumString, IntoStaticStr};

/// Identifier of every move in the battle tables. The string form (`"emberBlast"`)
/// is the id used by game scripts and the event wire format.
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
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Move {
    // Basic moves
    Tackle,
    Scratch,
    Glare,
    Rest,

    // Fire
    EmberBlast,
    HotboxHaze,
    BlazeUp,
    InfernoRush,

    // Water
    SplashWave,
    MellowTide,
    TidalCrush,
    DrenchSoak,

    // Earth
    RootSlam,
    EarthenGuard,
    BoulderBash,
    NaturesBind,

    // Air
    GustSlash,
    CloudNine,
    TornadoSpin,
    ZephyrDash,

    // Spirit
    CosmicBeam,
    ThirdEye,
    AstralPunch,
    DimensionRift,
    VibeCheck,
}

impl Move {
    /// The wire id of this move, e.g. `"emberBlast"`.
    pub fn id(self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}
