/**
 * Cell updater (§4.6): advances conserved variables one explicit
 * forward-Euler step and recovers/validates primitives.
 */
use crate::app::Error;
use crate::flux::Flux;
use crate::physics::{Conserved, Primitive};

/// (rho, rho u, rho E) = old - nu*(F_right - F_left), nu = dt/dx.
/// Geometric source terms are added separately by the caller.
pub fn advance_conserved(old: Conserved, flux_left: &Flux, flux_right: &Flux, nu: f64) -> Conserved {
    Conserved {
        mass: old.mass - nu * (flux_right.mass - flux_left.mass),
        mom_x: old.mom_x - nu * (flux_right.mom_normal - flux_left.mom_normal),
        mom_y: old.mom_y - nu * (flux_right.mom_tangential - flux_left.mom_tangential),
        energy: old.energy - nu * (flux_right.energy - flux_left.energy),
    }
}

/// `cell` and `step` are only used for the diagnostic on failure.
pub fn recover_and_validate(conserved: Conserved, gamma: f64, eps: f64, step: usize, cell: usize) -> Result<Primitive, Error> {
    if !conserved.is_finite() {
        return Err(Error::NonPhysicalUpdate { step, cell });
    }
    let primitive = conserved.to_primitive(gamma);
    if !primitive.is_physical(eps) {
        return Err(Error::NonPhysicalUpdate { step, cell });
    }
    Ok(primitive)
}

/// Geometric source term for a radial grid of dimensionality `m`
/// (1 planar/no source, 2 cylindrical, 3 spherical), added to the
/// momentum and energy equations as `(m-1)/r * p` and `(m-1)/r * p *
/// u` respectively — the usual finite-volume discretization of the
/// 1/r^{m-1} d/dr(r^{m-1} (...)) divergence in radial symmetry.
pub fn radial_source(m: u8, r: f64, primitive: &Primitive, dt: f64) -> Conserved {
    if m <= 1 || r <= 0.0 {
        return Conserved::default();
    }
    let factor = (m as f64 - 1.0) / r * dt;
    Conserved {
        mass: 0.0,
        mom_x: factor * primitive.p,
        mom_y: 0.0,
        energy: factor * primitive.p * primitive.u,
    }
}
