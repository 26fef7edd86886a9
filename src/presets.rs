//! Ready-made grammars, each an axiom followed by its productions.

use serde::{Deserialize, Serialize};

/// Built-in grammars that can be fed to [`LSystem::load_preset`](crate::LSystem::load_preset).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Preset {
    /// Symmetric bush: `F -> F[+F]F[-F]F`.
    Bush,
    /// Sparse forked branching.
    Sparse,
    /// Weedy plant with doubled stems.
    Weed,
    /// Fern-like frond driven by a non-drawing `X` apex.
    Fern,
    /// Twig with paired side shoots.
    Twig,
    /// Stochastic 3D plant with leaves (`L`) and leaf outlines (`{ }`) as markers.
    Plant,
}

impl Preset {
    pub const ALL: [Preset; 6] = [
        Preset::Bush,
        Preset::Sparse,
        Preset::Weed,
        Preset::Fern,
        Preset::Twig,
        Preset::Plant,
    ];

    pub fn lines(self) -> &'static [&'static str] {
        match self {
            Preset::Bush => &["F", "F -> F[+F]F[-F]F"],
            Preset::Sparse => &["F", "F -> [+F]F[-F][F]"],
            Preset::Weed => &["F", "F -> FF-[-F+F+F]+[+F-F-F]"],
            Preset::Fern => &["X", "X -> F[+X]F[-X]+X", "F -> FF"],
            Preset::Twig => &["X", "X -> F[+X][-X]FX", "F -> FF"],
            Preset::Plant => &[
                "R",
                "R -> FA",
                "A -> [&FL!A]/////[&FL!A]///////[&FL!A]",
                "F -> S/////F",
                "F -> LS//L//F",
                "S -> FL",
                "L -> [^^{-f+f+f-|-f+f+f}]",
            ],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Bush => "bush",
            Preset::Sparse => "sparse",
            Preset::Weed => "weed",
            Preset::Fern => "fern",
            Preset::Twig => "twig",
            Preset::Plant => "plant",
        }
    }

    /// Case-insensitive lookup by [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }
}
