//! The dataset the game ships with.

use schema::{
    ElementConfig, ElementType, ModelType, Move, MoveAnimation, MoveCategory, MoveData, Rarity,
    Species, SpeciesData, StatModifiers, StatusApplication, StatusEffectData, StatusEffectKind,
    StatusTarget,
};
use std::collections::BTreeMap;

use ElementType::{Air, Earth, Fire, Spirit, Water};
use MoveCategory::{Physical, Special, Status};
use StatusEffectKind::*;
use StatusTarget::{Enemy, User};

pub fn elements() -> BTreeMap<ElementType, ElementConfig> {
    BTreeMap::from([
        (Fire, ElementConfig::new("Fire", "#ff4400", Earth, Water)),
        (Water, ElementConfig::new("Water", "#0088ff", Fire, Earth)),
        (Earth, ElementConfig::new("Earth", "#88aa44", Air, Fire)),
        (Air, ElementConfig::new("Air", "#aaddff", Water, Earth)),
        (Spirit, ElementConfig::new("Spirit", "#dd88ff", Spirit, Spirit)),
    ])
}

pub fn status_effects() -> BTreeMap<StatusEffectKind, StatusEffectData> {
    BTreeMap::from([
        (
            Burned,
            StatusEffectData {
                damage_per_turn: Some(8),
                ..status(
                    "Burned",
                    "Taking fire damage each turn",
                    3,
                    StatModifiers { attack: -0.1, ..Default::default() },
                )
            },
        ),
        (
            Soaked,
            status(
                "Soaked",
                "Movement slowed",
                3,
                StatModifiers { speed: -0.3, ..Default::default() },
            ),
        ),
        (
            Rooted,
            status(
                "Rooted",
                "Cannot flee from battle",
                4,
                StatModifiers { speed: -0.2, defense: 0.1, ..Default::default() },
            ),
        ),
        (
            Dazed,
            status(
                "Dazed",
                "Seeing stars...",
                2,
                StatModifiers { accuracy: -0.25, ..Default::default() },
            ),
        ),
        (
            Enlightened,
            status(
                "Enlightened",
                "+30% crit chance, +10% accuracy. Your attacks hit harder and more reliably!",
                3,
                StatModifiers { crit_rate: 0.3, accuracy: 0.1, ..Default::default() },
            ),
        ),
        (
            Mellow,
            StatusEffectData {
                // Negative damage heals.
                damage_per_turn: Some(-5),
                ..status(
                    "Mellow",
                    "Heals 5 HP/turn but -15% attack. Trade offense for sustainability.",
                    4,
                    StatModifiers { attack: -0.15, defense: 0.1, ..Default::default() },
                )
            },
        ),
        (
            Vibing,
            status(
                "Vibing",
                "+25% defense, +10% speed. You're in the zone - harder to hit and moving faster!",
                3,
                StatModifiers { defense: 0.25, speed: 0.1, ..Default::default() },
            ),
        ),
        (
            Stoned,
            StatusEffectData {
                skip_turn_chance: Some(0.25),
                ..status(
                    "Stoned",
                    "Too baked to move sometimes",
                    3,
                    StatModifiers { defense: 0.2, speed: -0.2, ..Default::default() },
                )
            },
        ),
        (
            Blazed,
            status(
                "Blazed",
                "Special powers amplified",
                3,
                StatModifiers { attack: 0.3, defense: -0.1, ..Default::default() },
            ),
        ),
    ])
}

pub fn moves() -> BTreeMap<Move, MoveData> {
    let all = vec![
        // Basic moves
        tackle(),
        base(Move::Scratch, "Scratch", "Sharp claws or appendages swipe at the foe.", Physical, Air, 35, 100, 0.1, 0, 35),
        MoveData {
            status_effect: inflict(Dazed, 0.6, Enemy),
            ..base(Move::Glare, "Glare", "An intimidating stare that might daze.", Status, Spirit, 0, 90, 0.0, 0, 20)
        },
        MoveData {
            healing: Some(30),
            ..base(Move::Rest, "Rest", "Take a breather and recover HP.", Status, Air, 0, 100, 0.0, -1, 10)
        },
        // Fire
        MoveData {
            status_effect: inflict(Burned, 0.2, Enemy),
            visual_effect: visual("fire-burst"),
            ..base(Move::EmberBlast, "Ember Blast", "A burst of flames engulfs the target.", Special, Fire, 55, 95, 0.1, 0, 25)
        },
        MoveData {
            status_effect: inflict(Stoned, 0.35, Enemy),
            visual_effect: visual("smoke-cloud"),
            ..base(Move::HotboxHaze, "Hotbox Haze", "Fill the air with smoky fire. May stone the target.", Special, Fire, 45, 85, 0.05, 0, 20)
        },
        MoveData {
            status_effect: inflict(Blazed, 1.0, User),
            visual_effect: visual("power-up"),
            ..base(Move::BlazeUp, "Blaze Up", "Ignite your inner fire for massive power.", Status, Fire, 0, 100, 0.0, 0, 15)
        },
        MoveData {
            recoil: Some(0.2),
            status_effect: inflict(Burned, 0.3, Enemy),
            visual_effect: visual("fire-rush"),
            ..base(Move::InfernoRush, "Inferno Rush", "An all-out blazing assault. Causes recoil.", Physical, Fire, 90, 85, 0.15, 0, 8)
        },
        // Water
        MoveData {
            status_effect: inflict(Soaked, 0.25, Enemy),
            visual_effect: visual("water-splash"),
            ..base(Move::SplashWave, "Splash Wave", "A refreshing wave crashes into the target.", Special, Water, 50, 100, 0.05, 0, 25)
        },
        MoveData {
            status_effect: inflict(Mellow, 1.0, User),
            visual_effect: visual("healing-wave"),
            ..base(Move::MellowTide, "Mellow Tide", "Calming waters that heal over time.", Status, Water, 0, 100, 0.0, 0, 10)
        },
        MoveData {
            status_effect: inflict(Soaked, 0.3, Enemy),
            visual_effect: visual("tidal-wave"),
            ..base(Move::TidalCrush, "Tidal Crush", "A massive wave that overwhelms the target.", Special, Water, 65, 75, 0.1, 0, 8)
        },
        MoveData {
            status_effect: inflict(Soaked, 1.0, Enemy),
            ..base(Move::DrenchSoak, "Drench & Soak", "Completely douse the enemy, slowing them.", Status, Water, 0, 95, 0.0, 1, 15)
        },
        // Earth
        MoveData {
            status_effect: inflict(Rooted, 0.2, Enemy),
            visual_effect: visual("root-attack"),
            ..base(Move::RootSlam, "Root Slam", "Vines and roots strike from below.", Physical, Earth, 55, 90, 0.1, 0, 20)
        },
        MoveData {
            status_effect: inflict(Vibing, 1.0, User),
            visual_effect: visual("earth-shield"),
            ..base(Move::EarthenGuard, "Earthen Guard", "Encase yourself in protective earth.", Status, Earth, 0, 100, 0.0, 0, 15)
        },
        MoveData {
            visual_effect: visual("rock-throw"),
            ..base(Move::BoulderBash, "Boulder Bash", "Hurl a massive rock at the enemy.", Physical, Earth, 80, 75, 0.15, -1, 10)
        },
        MoveData {
            status_effect: inflict(Rooted, 1.0, Enemy),
            visual_effect: visual("vine-trap"),
            ..base(Move::NaturesBind, "Nature's Bind", "Trap the enemy in living vines.", Status, Earth, 0, 85, 0.0, 0, 15)
        },
        // Air
        MoveData {
            visual_effect: visual("wind-slash"),
            ..base(Move::GustSlash, "Gust Slash", "Sharp wind blades cut through the air.", Special, Air, 50, 95, 0.15, 1, 25)
        },
        MoveData {
            status_effect: inflict(Mellow, 1.0, User),
            healing: Some(15),
            visual_effect: visual("cloud-float"),
            ..base(Move::CloudNine, "Cloud Nine", "Float on clouds, entering a chill state.", Status, Air, 0, 100, 0.0, 0, 10)
        },
        MoveData {
            status_effect: inflict(Dazed, 0.3, Enemy),
            visual_effect: visual("tornado"),
            ..base(Move::TornadoSpin, "Tornado Spin", "Become a whirlwind of destruction.", Physical, Air, 75, 85, 0.1, 0, 12)
        },
        MoveData {
            visual_effect: visual("speed-lines"),
            ..base(Move::ZephyrDash, "Zephyr Dash", "Lightning-fast wind attack. Always goes first.", Physical, Air, 40, 100, 0.2, 2, 20)
        },
        // Spirit
        MoveData {
            visual_effect: visual("cosmic-ray"),
            ..base(Move::CosmicBeam, "Cosmic Beam", "Channel the energy of the cosmos.", Special, Spirit, 70, 90, 0.15, 0, 15)
        },
        MoveData {
            status_effect: inflict(Enlightened, 1.0, User),
            visual_effect: visual("eye-glow"),
            ..base(Move::ThirdEye, "Third Eye", "Open your mind to enlightenment.", Status, Spirit, 0, 100, 0.0, 0, 15)
        },
        MoveData {
            visual_effect: visual("spirit-fist"),
            ..base(Move::AstralPunch, "Astral Punch", "Strike with otherworldly force.", Physical, Spirit, 65, 95, 0.2, 0, 20)
        },
        MoveData {
            recoil: Some(0.15),
            visual_effect: visual("reality-tear"),
            ..base(Move::DimensionRift, "Dimension Rift", "Tear reality. Devastating but inaccurate.", Special, Spirit, 110, 65, 0.25, -1, 5)
        },
        MoveData {
            visual_effect: visual("vibe-wave"),
            ..base(Move::VibeCheck, "Vibe Check", "Judge the enemys vibes. High crit if theyre not chill.", Physical, Spirit, 45, 100, 0.35, 0, 20)
        },
    ];

    all.into_iter().map(|data| (data.id, data)).collect()
}

pub fn species() -> BTreeMap<Species, SpeciesData> {
    use Move::*;
    use ModelType::{Glb, Vrm};
    use Rarity::*;

    const GLB_CDN: &str = "https://notbloxo.fra1.cdn.digitaloceanspaces.com/Notblox-Assets/animal";

    BTreeMap::from([
        (
            Species::Cutephetta,
            pet("Cute Phetta", Spirit, [Tackle, CosmicBeam, ThirdEye, VibeCheck], "/assets/avatars/phettav5.vrm".into(), Vrm, Common),
        ),
        (
            Species::Lovebug,
            pet("Lovebug", Air, [Scratch, GustSlash, CloudNine, ZephyrDash], "/assets/pets/lovebug_1.vrm".into(), Vrm, Common),
        ),
        (
            Species::Meep,
            pet("Meep", Earth, [Tackle, RootSlam, EarthenGuard, BoulderBash], "/assets/pets/meep_1.vrm".into(), Vrm, Uncommon),
        ),
        (
            Species::Pizzalotl,
            pet("Pizzalotl", Fire, [Tackle, EmberBlast, HotboxHaze, InfernoRush], "/assets/pets/pizzalotl_1.vrm".into(), Vrm, Rare),
        ),
        (
            Species::Alienfella,
            pet("Alien Fella", Spirit, [Glare, CosmicBeam, DimensionRift, AstralPunch], "/assets/pets/alienfella_1.vrm".into(), Vrm, Rare),
        ),
        (
            Species::Redfox,
            pet("Red Fox", Fire, [Scratch, EmberBlast, BlazeUp, InfernoRush], "/assets/pets/redfox_1.vrm".into(), Vrm, Uncommon),
        ),
        (
            Species::Griffin,
            pet("Griffin", Air, [Scratch, GustSlash, TornadoSpin, ZephyrDash], "/assets/pets/blufella_1.vrm".into(), Vrm, Legendary),
        ),
        (
            Species::Sparky,
            pet("Sparky", Fire, [Tackle, EmberBlast, HotboxHaze, BlazeUp], "/assets/pets/sparky_1.vrm".into(), Vrm, Common),
        ),
        (
            Species::Cat,
            pet("Cat", Earth, [Scratch, Tackle, GustSlash, RootSlam], format!("{GLB_CDN}/Cat.glb"), Glb, Common),
        ),
        (
            Species::Dog,
            pet("Dog", Earth, [Tackle, RootSlam, Scratch, GustSlash], format!("{GLB_CDN}/Dog.glb"), Glb, Uncommon),
        ),
        (
            Species::Wolf,
            pet("Wolf", Air, [Scratch, GustSlash, Tackle, CosmicBeam], format!("{GLB_CDN}/Wolf.glb"), Glb, Legendary),
        ),
    ])
}

/// The universal basic attack. Also used when a dataset lacks one.
pub fn tackle() -> MoveData {
    base(Move::Tackle, "Tackle", "A basic body slam attack.", Physical, Earth, 40, 100, 0.05, 0, 35)
}

#[allow(clippy::too_many_arguments)]
fn base(
    id: Move,
    name: &str,
    description: &str,
    category: MoveCategory,
    element: ElementType,
    power: u32,
    accuracy: u32,
    crit_rate: f64,
    priority: i8,
    max_pp: u8,
) -> MoveData {
    let animation = match category {
        Physical => MoveAnimation::Attack,
        Special => MoveAnimation::Special,
        Status => MoveAnimation::Status,
    };
    MoveData {
        id,
        name: name.to_string(),
        description: description.to_string(),
        category,
        element,
        power,
        accuracy,
        crit_rate,
        priority,
        max_pp,
        status_effect: None,
        healing: None,
        recoil: None,
        animation,
        visual_effect: None,
    }
}

fn inflict(effect: StatusEffectKind, chance: f64, target: StatusTarget) -> Option<StatusApplication> {
    Some(StatusApplication { effect, chance, target })
}

fn visual(class: &str) -> Option<String> {
    Some(class.to_string())
}

fn status(name: &str, description: &str, duration: u8, stat_modifier: StatModifiers) -> StatusEffectData {
    StatusEffectData {
        name: name.to_string(),
        description: description.to_string(),
        duration,
        damage_per_turn: None,
        stat_modifier,
        skip_turn_chance: None,
    }
}

fn pet(
    name: &str,
    element: ElementType,
    moveset: [Move; 4],
    model_url: String,
    model_type: ModelType,
    rarity: Rarity,
) -> SpeciesData {
    SpeciesData {
        name: name.to_string(),
        element,
        moveset: moveset.to_vec(),
        model_url,
        model_type,
        rarity,
    }
}
