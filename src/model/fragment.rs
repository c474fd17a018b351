use super::atom::Atom;
use super::types::Element;
use nalgebra::{Matrix3, Vector3};

/// A rigid, non-periodic group of atoms placed as one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    atoms: Vec<Atom>,
}

impl Fragment {
    pub fn new(atoms: Vec<Atom>) -> Self {
        Self { atoms }
    }

    /// A fragment holding one atom at the origin.
    pub fn single(element: Element) -> Self {
        Self::new(vec![Atom::new(element, [0.0; 3])])
    }

    #[inline]
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn elements(&self) -> impl Iterator<Item = Element> + '_ {
        self.atoms.iter().map(|a| a.element)
    }

    /// Unweighted mean of the atomic positions.
    pub fn center_of_positions(&self) -> [f64; 3] {
        if self.atoms.is_empty() {
            return [0.0; 3];
        }
        let sum = self
            .atoms
            .iter()
            .fold(Vector3::<f64>::zeros(), |acc, a| acc + Vector3::from(a.position));
        (sum / self.atoms.len() as f64).into()
    }

    pub fn translate(&mut self, offset: [f64; 3]) {
        for atom in &mut self.atoms {
            *atom = atom.translated(offset);
        }
    }

    /// Rotates about `center` by Euler angles in degrees, z-x-z convention:
    /// `phi` about z, then `theta` about x, then `psi` about z again.
    pub fn euler_rotate(&mut self, phi: f64, theta: f64, psi: f64, center: [f64; 3]) {
        let rotation = euler_matrix(phi.to_radians(), theta.to_radians(), psi.to_radians());
        let center = Vector3::from(center);
        for atom in &mut self.atoms {
            let relative = Vector3::from(atom.position) - center;
            atom.position = (rotation * relative + center).into();
        }
    }
}

impl From<Element> for Fragment {
    fn from(element: Element) -> Self {
        Self::single(element)
    }
}

fn euler_matrix(phi: f64, theta: f64, psi: f64) -> Matrix3<f64> {
    let (sp, cp) = phi.sin_cos();
    let (st, ct) = theta.sin_cos();
    let (ss, cs) = psi.sin_cos();
    let d = Matrix3::new(cp, sp, 0.0, -sp, cp, 0.0, 0.0, 0.0, 1.0);
    let c = Matrix3::new(1.0, 0.0, 0.0, 0.0, ct, st, 0.0, -st, ct);
    let b = Matrix3::new(cs, ss, 0.0, -ss, cs, 0.0, 0.0, 0.0, 1.0);
    b * c * d
}
