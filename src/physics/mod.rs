/**
 * Primitive and conserved point-states, the ideal-gas sound speed, and
 * the direction of a sweep. The actual solvers (riemann.rs, grp.rs)
 * operate on these rather than on whole-field arrays; state.rs and
 * flux.rs are what marshal field arrays into and out of them.
 */
use crate::traits::{EquationOfState, IdealGas};




/// A single cell's primitive variables. `gamma` is carried alongside
/// rather than embedded in the per-cell arrays of state.rs, since for
/// a single-fluid run it is a scalar constant and for multi-fluid/
/// multi-phase runs it is derived (see `Field::gamma_at`).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Primitive {
    pub rho: f64,
    pub u: f64,
    pub v: f64,
    pub p: f64,
}

/// A single cell's conserved variables (mass, x-momentum, y-momentum,
/// total energy density).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Conserved {
    pub mass: f64,
    pub mom_x: f64,
    pub mom_y: f64,
    pub energy: f64,
}

impl Primitive {
    pub fn sound_speed(&self, gamma: f64) -> f64 {
        IdealGas.sound_speed(self.rho, self.p, gamma)
    }

    pub fn to_conserved(&self, gamma: f64) -> Conserved {
        let e = IdealGas.specific_energy(self.rho, self.u, self.v, self.p, gamma);
        Conserved {
            mass: self.rho,
            mom_x: self.rho * self.u,
            mom_y: self.rho * self.v,
            energy: self.rho * e,
        }
    }

    pub fn is_physical(&self, eps: f64) -> bool {
        self.rho > eps && self.p > eps && self.rho.is_finite() && self.p.is_finite()
            && self.u.is_finite() && self.v.is_finite()
    }
}

impl Conserved {
    pub fn to_primitive(&self, gamma: f64) -> Primitive {
        let u = self.mom_x / self.mass;
        let v = self.mom_y / self.mass;
        let p = IdealGas.pressure(self.mass, self.mom_x, self.mom_y, self.energy, gamma);
        Primitive { rho: self.mass, u, v, p }
    }

    pub fn is_finite(&self) -> bool {
        self.mass.is_finite() && self.mom_x.is_finite() && self.mom_y.is_finite() && self.energy.is_finite()
    }
}

impl std::ops::Add for Conserved {
    type Output = Conserved;
    fn add(self, rhs: Conserved) -> Conserved {
        Conserved {
            mass: self.mass + rhs.mass,
            mom_x: self.mom_x + rhs.mom_x,
            mom_y: self.mom_y + rhs.mom_y,
            energy: self.energy + rhs.energy,
        }
    }
}

impl std::ops::Sub for Conserved {
    type Output = Conserved;
    fn sub(self, rhs: Conserved) -> Conserved {
        Conserved {
            mass: self.mass - rhs.mass,
            mom_x: self.mom_x - rhs.mom_x,
            mom_y: self.mom_y - rhs.mom_y,
            energy: self.energy - rhs.energy,
        }
    }
}

impl std::ops::Mul<f64> for Conserved {
    type Output = Conserved;
    fn mul(self, s: f64) -> Conserved {
        Conserved { mass: self.mass * s, mom_x: self.mom_x * s, mom_y: self.mom_y * s, energy: self.energy * s }
    }
}




/// Which axis an interface sweep is resolving.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    X,
    Y,
}

impl Direction {
    /// Swap (u, v) into (normal, tangential) order for this direction,
    /// so the 1D solvers can be reused verbatim on a y-sweep (§4.5:
    /// "the y-sweep swaps u and v but is otherwise identical").
    pub fn into_normal_tangential(self, u: f64, v: f64) -> (f64, f64) {
        match self {
            Direction::X => (u, v),
            Direction::Y => (v, u),
        }
    }

    pub fn from_normal_tangential(self, normal: f64, tangential: f64) -> (f64, f64) {
        match self {
            Direction::X => (normal, tangential),
            Direction::Y => (tangential, normal),
        }
    }
}




/// Wood-type harmonic mean of two phase adiabatic indices, weighted by
/// the volume fraction `z_a` of phase a (§4.6: "Recompute per-cell
/// gamma for multi-fluid via the Wood-type harmonic mean of phase
/// gamma's when a volume fraction is present").
pub fn wood_harmonic_gamma(gamma_a: f64, gamma_b: f64, z_a: f64) -> f64 {
    1.0 / (z_a / gamma_a + (1.0 - z_a) / gamma_b)
}
