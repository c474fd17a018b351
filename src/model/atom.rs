use super::types::Element;
use serde::Deserialize;

/// A single atom: element identity and Cartesian position in Ångströms.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Atom {
    pub element: Element,
    pub position: [f64; 3],
}

impl Atom {
    pub fn new(element: Element, position: [f64; 3]) -> Self {
        Self { element, position }
    }

    /// Returns a copy displaced by `offset`.
    #[inline]
    pub fn translated(&self, offset: [f64; 3]) -> Self {
        let [x, y, z] = self.position;
        Self {
            element: self.element,
            position: [x + offset[0], y + offset[1], z + offset[2]],
        }
    }
}
