//! Particle populations: typed descriptors and the shared builder.
//!
//! A population is built once. Its members keep their assembled position,
//! scatter target and static attributes for their whole lifetime; the motion
//! evaluator only reads them.

use crate::constants::*;
use crate::distribution::{self, Cone};
use glam::Vec3;
use rand::seq::SliceRandom;
use rand::Rng;

/// Every visual population in the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PopulationKind {
    Needles,
    Bulbs,
    Lights,
    Gifts,
    Orbs,
    CinematicOrbs,
    Snow,
    Dust,
    Glow,
}

/// Geometry hint for the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Point,
    Sphere { radius: f32 },
    Cube { size: f32 },
}

impl PopulationKind {
    pub const ALL: [PopulationKind; 9] = [
        PopulationKind::Needles,
        PopulationKind::Bulbs,
        PopulationKind::Lights,
        PopulationKind::Gifts,
        PopulationKind::Orbs,
        PopulationKind::CinematicOrbs,
        PopulationKind::Snow,
        PopulationKind::Dust,
        PopulationKind::Glow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Needles => "needles",
            Self::Bulbs => "bulbs",
            Self::Lights => "lights",
            Self::Gifts => "gifts",
            Self::Orbs => "orbs",
            Self::CinematicOrbs => "cinematic-orbs",
            Self::Snow => "snow",
            Self::Dust => "dust",
            Self::Glow => "glow",
        }
    }

    /// Ornaments hidden by the decorations toggle.
    pub fn is_decoration(&self) -> bool {
        matches!(
            self,
            Self::Bulbs | Self::Gifts | Self::Orbs | Self::CinematicOrbs
        )
    }

    /// Dust floats in world space; everything else turns with the tree.
    pub fn follows_tree_rotation(&self) -> bool {
        !matches!(self, Self::Dust)
    }

    pub fn shape(&self) -> Shape {
        match self {
            Self::Gifts => Shape::Cube { size: 0.6 },
            Self::Orbs => Shape::Sphere { radius: 0.4 },
            Self::CinematicOrbs => Shape::Sphere { radius: 0.6 },
            Self::Lights => Shape::Sphere { radius: 0.025 },
            _ => Shape::Point,
        }
    }
}

/// Brightness oscillation rule of a single member.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlinkClass {
    /// No modulation.
    Solid,
    /// Small shimmer around 0.9.
    Steady,
    /// Slow breathing between 0.4 and 1.2.
    Pulse,
    /// Hard fairy-light flicker between 0.2 and 1.5.
    Twinkle,
    /// Fast accent flash between 0.5 and 2.5.
    Flash,
    /// Bulb glow between 0.8 and 2.8.
    Glint,
}

/// Static per-member attributes, fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MemberAttrs {
    pub color: Vec3,
    pub size: f32,
    pub weight: f32,
    pub blink: BlinkClass,
    pub phase: f32,
    /// Per-member random triple for ambient float paths.
    pub drift: Vec3,
    /// Fall speed for snow, unused elsewhere.
    pub speed: f32,
}

impl Default for MemberAttrs {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            size: 1.0,
            weight: 1.0,
            blink: BlinkClass::Solid,
            phase: 0.0,
            drift: Vec3::ZERO,
            speed: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Member {
    pub assembled: Vec3,
    pub scattered: Vec3,
    pub attrs: MemberAttrs,
}

/// Where members sit in the assembled tree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Placement {
    GoldenCone,
    ConeShell { min_ratio: f32, span: f32 },
    Box { size: f32 },
    Cylinder { min_radius: f32, radius_span: f32, height: f32 },
}

/// Where members go when scattered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScatterRule {
    /// Scatter target equals the assembled position.
    Static,
    Shell { base_radius: f32 },
    /// Shell whose base radius is divided by the member weight.
    WeightedShell { base_radius: f32 },
}

/// How static attributes are drawn.
#[derive(Clone, Debug, PartialEq)]
pub enum AttributeRule {
    Needle,
    Bulb { palette: Vec<Vec3> },
    LightClasses { palette: Vec<Vec3> },
    Ornament { palette: Vec<Vec3>, size_min: f32, size_span: f32, flash_white: bool },
    Snowflake,
    Dust,
    Mote,
}

/// Colour treatment of a morphing population.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shade {
    /// Member colour times blink brightness.
    Member,
    /// Per-member blend between two colours driven by a fast sine.
    Sparkle { from: Vec3, to: Vec3 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MorphProfile {
    pub turbulence: f32,
    /// Float amplitude for a member of weight 1.
    pub float_amplitude: f32,
    pub alpha_fade: f32,
    pub scale_pulse: bool,
    pub shade: Shade,
}

impl Default for MorphProfile {
    fn default() -> Self {
        Self {
            turbulence: 0.0,
            float_amplitude: 0.0,
            alpha_fade: 0.0,
            scale_pulse: false,
            shade: Shade::Member,
        }
    }
}

/// Per-frame motion rule shared by all members of a population.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MotionRule {
    Morph(MorphProfile),
    Snowfall,
    Drift,
    Hover,
}

#[derive(Clone, Debug)]
pub struct Population {
    kind: PopulationKind,
    members: Vec<Member>,
    rule: MotionRule,
}

impl Population {
    pub fn kind(&self) -> PopulationKind {
        self.kind
    }
    pub fn rule(&self) -> MotionRule {
        self.rule
    }
    pub fn members(&self) -> &[Member] {
        &self.members
    }
    pub fn len(&self) -> usize {
        self.members.len()
    }
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Typed descriptor of a population; `build` draws every member once.
#[derive(Clone, Debug)]
pub struct PopulationBuilder {
    kind: PopulationKind,
    count: usize,
    cone: Cone,
    placement: Placement,
    scatter: ScatterRule,
    attributes: AttributeRule,
    rule: MotionRule,
}

fn palette(colors: &[[f32; 3]]) -> Vec<Vec3> {
    colors.iter().map(|c| Vec3::from(*c)).collect()
}

impl PopulationBuilder {
    pub fn new(kind: PopulationKind) -> Self {
        Self {
            kind,
            count: 0,
            cone: Cone::default(),
            placement: Placement::GoldenCone,
            scatter: ScatterRule::Static,
            attributes: AttributeRule::Dust,
            rule: MotionRule::Drift,
        }
    }

    /// Descriptor reproducing the stock look of `kind`.
    pub fn preset(kind: PopulationKind) -> Self {
        let base = Self::new(kind);
        let ornament_profile = MorphProfile {
            float_amplitude: 0.3,
            ..MorphProfile::default()
        };
        match kind {
            PopulationKind::Needles => base
                .count(NEEDLE_COUNT)
                .placement(Placement::GoldenCone)
                .scatter(ScatterRule::Shell {
                    base_radius: NEEDLE_SCATTER_RADIUS,
                })
                .attributes(AttributeRule::Needle)
                .motion(MotionRule::Morph(MorphProfile {
                    turbulence: 0.5,
                    alpha_fade: 0.3,
                    shade: Shade::Sparkle {
                        from: Vec3::from(NEEDLE_COLOR_START),
                        to: Vec3::from(NEEDLE_COLOR_END),
                    },
                    ..MorphProfile::default()
                })),
            PopulationKind::Bulbs => base
                .count(BULB_COUNT)
                .placement(Placement::ConeShell {
                    min_ratio: 0.8,
                    span: 0.3,
                })
                .scatter(ScatterRule::Shell {
                    base_radius: BULB_SCATTER_RADIUS,
                })
                .attributes(AttributeRule::Bulb {
                    palette: palette(&[RED, GOLD, WHITE]),
                })
                .motion(MotionRule::Morph(MorphProfile {
                    turbulence: 0.5,
                    alpha_fade: 0.1,
                    ..MorphProfile::default()
                })),
            PopulationKind::Lights => base
                .count(LIGHT_COUNT)
                .placement(Placement::ConeShell {
                    min_ratio: 0.85,
                    span: 0.25,
                })
                .scatter(ScatterRule::WeightedShell {
                    base_radius: LIGHT_SCATTER_RADIUS,
                })
                .attributes(AttributeRule::LightClasses {
                    palette: palette(&WARM_LIGHTS),
                })
                .motion(MotionRule::Morph(MorphProfile {
                    float_amplitude: 0.5 * 0.3,
                    scale_pulse: true,
                    ..MorphProfile::default()
                })),
            PopulationKind::Gifts => base
                .count(GIFT_COUNT)
                .placement(Placement::ConeShell {
                    min_ratio: 0.9,
                    span: 0.0,
                })
                .scatter(ScatterRule::Shell {
                    base_radius: GIFT_SCATTER_RADIUS,
                })
                .attributes(AttributeRule::Ornament {
                    palette: palette(&[METALLIC_GOLD, DARK_RED, EMERALD]),
                    size_min: 1.0,
                    size_span: 0.0,
                    flash_white: false,
                })
                .motion(MotionRule::Morph(ornament_profile)),
            PopulationKind::Orbs => base
                .count(ORB_COUNT)
                .placement(Placement::ConeShell {
                    min_ratio: 0.85,
                    span: 0.0,
                })
                .scatter(ScatterRule::Shell {
                    base_radius: ORB_SCATTER_RADIUS,
                })
                .attributes(AttributeRule::Ornament {
                    palette: palette(&[METALLIC_GOLD, RED]),
                    size_min: 1.0,
                    size_span: 0.0,
                    flash_white: false,
                })
                .motion(MotionRule::Morph(ornament_profile)),
            PopulationKind::CinematicOrbs => base
                .count(CINEMATIC_COUNT)
                .placement(Placement::ConeShell {
                    min_ratio: 0.3,
                    span: 0.6,
                })
                .scatter(ScatterRule::Shell {
                    base_radius: CINEMATIC_SCATTER_RADIUS,
                })
                .attributes(AttributeRule::Ornament {
                    palette: palette(&[RED, GOLD, WHITE]),
                    size_min: 0.25,
                    size_span: 0.4,
                    flash_white: true,
                })
                .motion(MotionRule::Morph(ornament_profile)),
            PopulationKind::Snow => base
                .count(SNOW_COUNT)
                .placement(Placement::Box {
                    size: AMBIENT_BOX_SIZE,
                })
                .attributes(AttributeRule::Snowflake)
                .motion(MotionRule::Snowfall),
            PopulationKind::Dust => base
                .count(DUST_COUNT)
                .placement(Placement::Box {
                    size: AMBIENT_BOX_SIZE,
                })
                .attributes(AttributeRule::Dust)
                .motion(MotionRule::Drift),
            PopulationKind::Glow => base
                .count(GLOW_COUNT)
                .placement(Placement::Cylinder {
                    min_radius: GLOW_RADIUS_MIN,
                    radius_span: GLOW_RADIUS_SPAN,
                    height: GLOW_HEIGHT,
                })
                .attributes(AttributeRule::Mote)
                .motion(MotionRule::Hover),
        }
    }

    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn cone(mut self, cone: Cone) -> Self {
        self.cone = cone;
        self
    }

    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn scatter(mut self, scatter: ScatterRule) -> Self {
        self.scatter = scatter;
        self
    }

    pub fn attributes(mut self, attributes: AttributeRule) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn motion(mut self, rule: MotionRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn build<R: Rng + ?Sized>(self, rng: &mut R) -> Population {
        if let AttributeRule::Bulb { palette }
        | AttributeRule::LightClasses { palette }
        | AttributeRule::Ornament { palette, .. } = &self.attributes
        {
            debug_assert!(
                !palette.is_empty(),
                "{} built with an empty palette",
                self.kind.as_str()
            );
        }
        let mut members = Vec::with_capacity(self.count);
        for i in 0..self.count {
            let assembled = self.place(i, rng);
            let attrs = self.draw_attrs(assembled, rng);
            let scattered = match self.scatter {
                ScatterRule::Static => assembled,
                ScatterRule::Shell { base_radius } => {
                    distribution::levitation_point(base_radius, rng)
                }
                ScatterRule::WeightedShell { base_radius } => {
                    distribution::levitation_point(base_radius / attrs.weight.max(1e-3), rng)
                }
            };
            members.push(Member {
                assembled,
                scattered,
                attrs,
            });
        }
        log::debug!("built {} x{}", self.kind.as_str(), members.len());
        Population {
            kind: self.kind,
            members,
            rule: self.rule,
        }
    }

    fn place<R: Rng + ?Sized>(&self, index: usize, rng: &mut R) -> Vec3 {
        match self.placement {
            Placement::GoldenCone => distribution::cone_point(index, self.count, self.cone, rng),
            Placement::ConeShell { min_ratio, span } => {
                distribution::cone_shell_point(self.cone, min_ratio, span, rng)
            }
            Placement::Box { size } => distribution::box_point(size, rng),
            Placement::Cylinder {
                min_radius,
                radius_span,
                height,
            } => distribution::cylinder_point(min_radius, radius_span, height, rng),
        }
    }

    fn draw_attrs<R: Rng + ?Sized>(&self, assembled: Vec3, rng: &mut R) -> MemberAttrs {
        let pick = |palette: &[Vec3], rng: &mut R| palette.choose(rng).copied().unwrap_or(Vec3::ONE);
        match &self.attributes {
            AttributeRule::Needle => MemberAttrs {
                color: Vec3::from(NEEDLE_COLOR_START),
                size: 0.12,
                phase: rng.gen::<f32>(),
                ..MemberAttrs::default()
            },
            AttributeRule::Bulb { palette } => MemberAttrs {
                color: pick(palette, rng),
                size: 0.4,
                blink: BlinkClass::Glint,
                // position-derived phase so neighbours blink out of step
                phase: assembled.dot(Vec3::new(12.989, 78.233, 45.164)),
                ..MemberAttrs::default()
            },
            AttributeRule::LightClasses { palette } => {
                let roll = rng.gen::<f32>();
                let (size, weight, blink) = if roll > 0.8 {
                    (2.5, 1.5 + rng.gen::<f32>() * 0.5, BlinkClass::Pulse)
                } else if roll > 0.2 {
                    (0.8, 0.5 + rng.gen::<f32>() * 0.5, BlinkClass::Twinkle)
                } else {
                    (1.2, 1.0, BlinkClass::Steady)
                };
                MemberAttrs {
                    color: pick(palette, rng),
                    size,
                    weight,
                    blink,
                    phase: rng.gen::<f32>() * 100.0,
                    ..MemberAttrs::default()
                }
            }
            AttributeRule::Ornament {
                palette,
                size_min,
                size_span,
                flash_white,
            } => {
                let color = pick(palette, rng);
                let blink = if *flash_white && color == Vec3::ONE {
                    BlinkClass::Flash
                } else {
                    BlinkClass::Solid
                };
                MemberAttrs {
                    color,
                    size: size_min + rng.gen::<f32>() * size_span,
                    blink,
                    phase: rng.gen::<f32>() * 100.0,
                    ..MemberAttrs::default()
                }
            }
            AttributeRule::Snowflake => {
                // mostly fine dust, some medium flakes, a few large bokeh flakes
                let roll = rng.gen::<f32>();
                let size = if roll > 0.97 {
                    rng.gen::<f32>() * 1.5 + 1.0
                } else if roll > 0.85 {
                    rng.gen::<f32>() * 0.5 + 0.4
                } else {
                    rng.gen::<f32>() * 0.2 + 0.1
                };
                MemberAttrs {
                    color: Vec3::from(SNOW_COLOR),
                    size,
                    speed: rng.gen::<f32>() * 1.5 + 0.5,
                    ..MemberAttrs::default()
                }
            }
            AttributeRule::Dust => MemberAttrs {
                color: Vec3::from(DUST_COLOR),
                ..MemberAttrs::default()
            },
            AttributeRule::Mote => MemberAttrs {
                color: Vec3::from(GLOW_COLOR),
                drift: Vec3::new(rng.gen(), rng.gen(), rng.gen()),
                size: 0.5 + rng.gen::<f32>() * 1.5,
                ..MemberAttrs::default()
            },
        }
    }
}
