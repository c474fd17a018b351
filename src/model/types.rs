use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid or unsupported element symbol: '{0}'")]
pub struct ParseElementError(String);

macro_rules! elements {
    ($($symbol:ident = $z:literal => $radius:literal,)+) => {
        /// Chemical element, hydrogen (Z = 1) through curium (Z = 96).
        ///
        /// The range matches the covalent radius data used to derive default
        /// minimum interatomic distances.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
        #[serde(try_from = "String")]
        #[repr(u8)]
        pub enum Element {
            $($symbol = $z,)+
        }

        impl Element {
            /// Every supported element in order of atomic number.
            pub const ALL: &'static [Element] = &[$(Element::$symbol,)+];

            pub fn symbol(&self) -> &'static str {
                match self {
                    $(Element::$symbol => stringify!($symbol),)+
                }
            }

            /// Single-bond covalent radius in Ångströms (Cordero et al., 2008).
            pub fn covalent_radius(&self) -> f64 {
                match self {
                    $(Element::$symbol => $radius,)+
                }
            }
        }
    };
}

elements! {
    H = 1 => 0.31,
    He = 2 => 0.28,
    Li = 3 => 1.28,
    Be = 4 => 0.96,
    B = 5 => 0.84,
    C = 6 => 0.76,
    N = 7 => 0.71,
    O = 8 => 0.66,
    F = 9 => 0.57,
    Ne = 10 => 0.58,
    Na = 11 => 1.66,
    Mg = 12 => 1.41,
    Al = 13 => 1.21,
    Si = 14 => 1.11,
    P = 15 => 1.07,
    S = 16 => 1.05,
    Cl = 17 => 1.02,
    Ar = 18 => 1.06,
    K = 19 => 2.03,
    Ca = 20 => 1.76,
    Sc = 21 => 1.70,
    Ti = 22 => 1.60,
    V = 23 => 1.53,
    Cr = 24 => 1.39,
    Mn = 25 => 1.39,
    Fe = 26 => 1.32,
    Co = 27 => 1.26,
    Ni = 28 => 1.24,
    Cu = 29 => 1.32,
    Zn = 30 => 1.22,
    Ga = 31 => 1.22,
    Ge = 32 => 1.20,
    As = 33 => 1.19,
    Se = 34 => 1.20,
    Br = 35 => 1.20,
    Kr = 36 => 1.16,
    Rb = 37 => 2.20,
    Sr = 38 => 1.95,
    Y = 39 => 1.90,
    Zr = 40 => 1.75,
    Nb = 41 => 1.64,
    Mo = 42 => 1.54,
    Tc = 43 => 1.47,
    Ru = 44 => 1.46,
    Rh = 45 => 1.42,
    Pd = 46 => 1.39,
    Ag = 47 => 1.45,
    Cd = 48 => 1.44,
    In = 49 => 1.42,
    Sn = 50 => 1.39,
    Sb = 51 => 1.39,
    Te = 52 => 1.38,
    I = 53 => 1.39,
    Xe = 54 => 1.40,
    Cs = 55 => 2.44,
    Ba = 56 => 2.15,
    La = 57 => 2.07,
    Ce = 58 => 2.04,
    Pr = 59 => 2.03,
    Nd = 60 => 2.01,
    Pm = 61 => 1.99,
    Sm = 62 => 1.98,
    Eu = 63 => 1.98,
    Gd = 64 => 1.96,
    Tb = 65 => 1.94,
    Dy = 66 => 1.92,
    Ho = 67 => 1.92,
    Er = 68 => 1.89,
    Tm = 69 => 1.90,
    Yb = 70 => 1.87,
    Lu = 71 => 1.87,
    Hf = 72 => 1.75,
    Ta = 73 => 1.70,
    W = 74 => 1.62,
    Re = 75 => 1.51,
    Os = 76 => 1.44,
    Ir = 77 => 1.41,
    Pt = 78 => 1.36,
    Au = 79 => 1.36,
    Hg = 80 => 1.32,
    Tl = 81 => 1.45,
    Pb = 82 => 1.46,
    Bi = 83 => 1.48,
    Po = 84 => 1.40,
    At = 85 => 1.50,
    Rn = 86 => 1.50,
    Fr = 87 => 2.60,
    Ra = 88 => 2.21,
    Ac = 89 => 2.15,
    Th = 90 => 2.06,
    Pa = 91 => 2.00,
    U = 92 => 1.96,
    Np = 93 => 1.90,
    Pu = 94 => 1.87,
    Am = 95 => 1.80,
    Cm = 96 => 1.69,
}

impl Element {
    #[inline]
    pub fn atomic_number(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Element {
    type Err = ParseElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Element::ALL
            .iter()
            .copied()
            .find(|el| el.symbol() == s)
            .ok_or_else(|| ParseElementError(s.to_string()))
    }
}

impl TryFrom<String> for Element {
    type Error = ParseElementError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    #[test]
    fn element_from_str_valid() {
        assert_eq!(Element::from_str("H").unwrap(), Element::H);
        assert_eq!(Element::from_str("Si").unwrap(), Element::Si);
        assert_eq!(Element::from_str("Fe").unwrap(), Element::Fe);
        assert_eq!(Element::from_str("Cm").unwrap(), Element::Cm);
    }

    #[test]
    fn element_from_str_is_case_sensitive() {
        let err = Element::from_str("CO").unwrap_err();
        assert_eq!(err.to_string(), "invalid or unsupported element symbol: 'CO'");
        assert!(Element::from_str("h").is_err());
    }

    #[test]
    fn elements_beyond_curium_are_unsupported() {
        assert!(Element::from_str("Bk").is_err());
        assert_eq!(Element::ALL.len(), 96);
    }

    #[test]
    fn atomic_numbers_follow_declaration_order() {
        for (i, el) in Element::ALL.iter().enumerate() {
            assert_eq!(el.atomic_number() as usize, i + 1);
        }
        assert_eq!(Element::Na.to_string(), "Na");
    }

    #[test]
    fn covalent_radius_values() {
        assert!(approx_eq(Element::H.covalent_radius(), 0.31, 1e-12));
        assert!(approx_eq(Element::C.covalent_radius(), 0.76, 1e-12));
        assert!(approx_eq(Element::Si.covalent_radius(), 1.11, 1e-12));
        assert!(approx_eq(Element::Cm.covalent_radius(), 1.69, 1e-12));
    }

    #[test]
    fn deserializes_from_symbol_string() {
        #[derive(Deserialize)]
        struct Wrapper {
            element: Element,
        }
        let w: Wrapper = toml::from_str(r#"element = "Ti""#).unwrap();
        assert_eq!(w.element, Element::Ti);
        assert!(toml::from_str::<Wrapper>(r#"element = "Xx""#).is_err());
    }
}
