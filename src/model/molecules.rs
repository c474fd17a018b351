//! Built-in molecular geometries, looked up by formula.
//!
//! Coordinates follow the G2 test set (MP2/6-31G* optimized), in Ångströms
//! with the molecule centered near the origin.

use super::atom::Atom;
use super::fragment::Fragment;
use super::types::Element::{self, C, Cl, F, H, N, O, Si};

type Geometry = &'static [(Element, [f64; 3])];

const MOLECULES: &[(&str, Geometry)] = &[
    ("H2", &[(H, [0.0, 0.0, 0.368583]), (H, [0.0, 0.0, -0.368583])]),
    ("N2", &[(N, [0.0, 0.0, 0.56499]), (N, [0.0, 0.0, -0.56499])]),
    ("O2", &[(O, [0.0, 0.0, 0.622978]), (O, [0.0, 0.0, -0.622978])]),
    ("F2", &[(F, [0.0, 0.0, 0.710304]), (F, [0.0, 0.0, -0.710304])]),
    ("Cl2", &[(Cl, [0.0, 0.0, 1.007541]), (Cl, [0.0, 0.0, -1.007541])]),
    ("HF", &[(F, [0.0, 0.0, 0.093389]), (H, [0.0, 0.0, -0.840502])]),
    ("HCl", &[(Cl, [0.0, 0.0, 0.07111]), (H, [0.0, 0.0, -1.208868])]),
    ("CO", &[(O, [0.0, 0.0, 0.493003]), (C, [0.0, 0.0, -0.657337])]),
    (
        "CO2",
        &[
            (C, [0.0, 0.0, 0.0]),
            (O, [0.0, 0.0, 1.178658]),
            (O, [0.0, 0.0, -1.178658]),
        ],
    ),
    (
        "H2O",
        &[
            (O, [0.0, 0.0, 0.119262]),
            (H, [0.0, 0.763239, -0.477047]),
            (H, [0.0, -0.763239, -0.477047]),
        ],
    ),
    (
        "NH3",
        &[
            (N, [0.0, 0.0, 0.116489]),
            (H, [0.0, 0.939731, -0.271808]),
            (H, [0.813831, -0.469865, -0.271808]),
            (H, [-0.813831, -0.469865, -0.271808]),
        ],
    ),
    (
        "CH4",
        &[
            (C, [0.0, 0.0, 0.0]),
            (H, [0.629118, 0.629118, 0.629118]),
            (H, [-0.629118, -0.629118, 0.629118]),
            (H, [0.629118, -0.629118, -0.629118]),
            (H, [-0.629118, 0.629118, -0.629118]),
        ],
    ),
    (
        "SiH4",
        &[
            (Si, [0.0, 0.0, 0.0]),
            (H, [0.856135, 0.856135, 0.856135]),
            (H, [-0.856135, -0.856135, 0.856135]),
            (H, [-0.856135, 0.856135, -0.856135]),
            (H, [0.856135, -0.856135, -0.856135]),
        ],
    ),
    (
        "C2H2",
        &[
            (C, [0.0, 0.0, 0.60808]),
            (C, [0.0, 0.0, -0.60808]),
            (H, [0.0, 0.0, -1.67399]),
            (H, [0.0, 0.0, 1.67399]),
        ],
    ),
    (
        "C2H4",
        &[
            (C, [0.0, 0.0, 0.66748]),
            (C, [0.0, 0.0, -0.66748]),
            (H, [0.0, 0.922832, 1.237695]),
            (H, [0.0, -0.922832, 1.237695]),
            (H, [0.0, 0.922832, -1.237695]),
            (H, [0.0, -0.922832, -1.237695]),
        ],
    ),
];

/// Looks up a molecule by formula name, e.g. `"H2O"`.
pub fn molecule(name: &str) -> Option<Fragment> {
    MOLECULES
        .iter()
        .find(|(formula, _)| *formula == name)
        .map(|(_, geometry)| {
            Fragment::new(
                geometry
                    .iter()
                    .map(|&(element, position)| Atom::new(element, position))
                    .collect(),
            )
        })
}

/// Names accepted by [`molecule`].
pub fn molecule_names() -> impl Iterator<Item = &'static str> {
    MOLECULES.iter().map(|(formula, _)| *formula)
}
