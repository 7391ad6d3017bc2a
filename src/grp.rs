/**
 * The Generalized Riemann Problem solver (§4.2). Given left/right
 * states *with* spatial slopes, returns the star-state and its time
 * derivative at the interface. Named after the original's
 * `linear_GRP_solver_*` family: the scheme is the linear/acoustic GRP
 * (Ben-Artzi & Falcovitz), which linearizes the characteristic and
 * shock-jump relations about the classical Riemann star-state rather
 * than solving the full nonlinear rate equations.
 *
 * Algorithm, following §4.2's 5 steps:
 *  1. solve the classical Riemann problem for (u*, p*) and wave types;
 *  2. classify the upwind side by the sign of u*;
 *  3. on each side, build one linear equation in (dp*/dt, du*/dt): the
 *     rarefaction/smooth side differentiates its characteristic
 *     (Riemann invariant) relation, the shock side differentiates the
 *     Rankine-Hugoniot jump, moving at the Rankine-Hugoniot shock
 *     speed instead of a characteristic speed;
 *  4. solve the resulting 2x2 linear system;
 *  5. derive dρ*/dt from the isentropic relation on the upwind side.
 *
 * Step 3 additionally detects the sonic case: when a rarefaction's head
 * and tail characteristic speeds straddle zero, x/t=0 sits inside the
 * fan rather than in the untouched upstream state, so both the rate
 * equation and the 0th-order (rho, u, p) reported at the interface are
 * evaluated at the fan's own self-similar sonic point instead.
 */
use crate::app::Error;
use crate::riemann::{self, Side, RiemannStar, WaveKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    /// Eulerian, fixed grid.
    Edir,
    /// Lagrangian, grid moves with the fluid: characteristic speeds
    /// drop the convective term u0 (the interface is always at the
    /// particle's own location).
    Lag,
    /// Quasi-1D: Edir plus a transverse-slope source term.
    Q1D,
    /// Genuinely 2D: Q1D plus the tangential-velocity slope feeds back
    /// into the normal-momentum rate.
    G2D,
}

/// One side's state plus its spatial slopes (x-slope; y-slope is
/// folded in by the caller only for the Q1D/G2D variants).
#[derive(Clone, Copy, Debug)]
pub struct SidePlm {
    pub rho: f64,
    pub u: f64,
    pub v: f64,
    pub p: f64,
    pub gamma: f64,
    pub s_rho: f64,
    pub s_u: f64,
    pub s_v: f64,
    pub s_p: f64,
}

impl SidePlm {
    fn riemann_side(&self) -> Side {
        Side::new(self.rho, self.u, self.p, self.gamma)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct GrpStar {
    pub rho: f64,
    pub u: f64,
    pub v: f64,
    pub p: f64,
    pub d_rho_dt: f64,
    pub d_u_dt: f64,
    pub d_p_dt: f64,
}

/// Per-side linear coefficient: dp*/dt + (sign) * impedance * du*/dt = phi.
/// `speed` is the characteristic/shock speed used for this side's rate
/// equation; `phi` is its right-hand side.
struct LinearEquation {
    impedance: f64,
    phi: f64,
}

fn side_equation(
    side: &SidePlm,
    wave: WaveKind,
    sign: f64,
    u_star: f64,
    p_star: f64,
    lagrangian: bool,
) -> LinearEquation {
    let riemann_side = side.riemann_side();
    let gamma = side.gamma;

    if wave == WaveKind::Rarefaction && !lagrangian {
        let c_star = riemann_side.c * (p_star / side.p).powf((gamma - 1.0) / (2.0 * gamma));
        let head = side.u + sign * riemann_side.c;
        let tail = u_star + sign * c_star;
        if head * sign > 0.0 && tail * sign < 0.0 {
            // Sonic case (§4.2): this fan's head and tail straddle
            // zero speed, so x/t=0 sits inside the fan rather than in
            // the untouched upstream state or the star region. The
            // characteristic through that point has speed zero
            // relative to the grid, so its rate contribution vanishes;
            // the impedance comes from the fan's own local density and
            // sound speed, not the upstream ones.
            let (rho_fan, _u_fan, p_fan) = riemann::fan_state(&riemann_side, sign, 0.0);
            let c_fan = (gamma * p_fan / rho_fan).sqrt();
            return LinearEquation { impedance: rho_fan * c_fan, phi: 0.0 };
        }
    }

    let c = riemann_side.c;
    let impedance = side.rho * c;
    let speed = match wave {
        WaveKind::Rarefaction => {
            if lagrangian { sign * impedance } else { side.u + sign * c }
        }
        WaveKind::Shock => {
            let rs = riemann::shock_speed(&riemann_side, p_star, sign);
            if lagrangian { sign * impedance } else { rs }
        }
    };

    // Characteristic/jump-rate relation: d(p + sign*Z*u)/dt = -speed * (s_p + sign*Z*s_u)
    // evaluated along this side's own spatial slopes.
    let phi = -speed * (side.s_p + sign * impedance * side.s_u);
    LinearEquation { impedance, phi }
}

/// Solve the interface GRP problem. `transverse` carries the tangential
/// velocity/pressure slopes used by the Q1D/G2D variants; pass zeros
/// (or omit via `Variant::Edir`/`Lag`) when they are not wanted (§4.5:
/// "Under the Transversa option... otherwise transverse slopes are
/// zeroed").
pub fn solve(
    variant: Variant,
    left: SidePlm,
    right: SidePlm,
    eps: f64,
    tolerance: f64,
    iteration_cap: usize,
) -> Result<GrpStar, Error> {
    let classical: RiemannStar = riemann::solve_two_component(
        left.riemann_side(),
        right.riemann_side(),
        eps,
        tolerance,
        iteration_cap,
    )?;

    if classical.p_star <= eps || !classical.p_star.is_finite() || !classical.u_star.is_finite() {
        return Err(Error::NonPhysicalStar);
    }

    let lagrangian = matches!(variant, Variant::Lag);

    let eq_l = side_equation(&left, classical.left_wave, -1.0, classical.u_star, classical.p_star, lagrangian);
    let eq_r = side_equation(&right, classical.right_wave, 1.0, classical.u_star, classical.p_star, lagrangian);

    // [ 1  Z_L] [p_t]   [phi_L]
    // [ 1 -Z_R] [u_t] = [phi_R]
    let (z_l, z_r) = (eq_l.impedance, eq_r.impedance);
    let denom = z_l + z_r;
    if denom.abs() < eps {
        return Err(Error::NonPhysicalStar);
    }
    let mut d_u_dt = (eq_l.phi - eq_r.phi) / denom;
    let mut d_p_dt = (eq_l.phi * z_r + eq_r.phi * z_l) / denom;

    // Tangential source terms for the genuinely-2D family (§4.2: "the
    // Q1D and G2D variants additionally inject tangential-derivative
    // source terms taken from the transverse slopes"). The upwind
    // side's tangential advection perturbs both rates; G2D additionally
    // lets the tangential velocity slope couple back into the normal
    // momentum rate through the upwind velocity.
    if matches!(variant, Variant::Q1D | Variant::G2D) {
        let upwind = if classical.u_star >= 0.0 { &left } else { &right };
        d_p_dt -= upwind.rho * upwind.v * upwind.s_p;
        if matches!(variant, Variant::G2D) {
            d_u_dt -= upwind.v * upwind.s_u;
        }
    }

    if !d_u_dt.is_finite() || !d_p_dt.is_finite() {
        return Err(Error::NonPhysicalStar);
    }

    // The true 0th-order state at x/t=0: equal to the classical star
    // state (u*, p*) only when the interface sits in the star region.
    // When a wave hasn't yet reached the interface, or a rarefaction's
    // head/tail straddle zero speed, this instead carries the untouched
    // upstream value or the fan-interior sample respectively (§4.2).
    let (rho0, u0, p0) = riemann::sample(&left.riemann_side(), &right.riemann_side(), &classical);

    // Step 5: isentropic rate relation on the upwind side gives
    // d(rho)/dt from d(p)/dt (Dp/Dt = (gamma p / rho) Drho/Dt along a
    // particle path, rearranged for the interface's partial rates).
    let upwind = if classical.u_star >= 0.0 { &left } else { &right };
    let d_rho_dt = upwind.rho / (upwind.gamma * p0) * (d_p_dt + u0 * upwind.s_p) - u0 * upwind.s_rho;

    if !d_rho_dt.is_finite() {
        return Err(Error::NonPhysicalStar);
    }

    Ok(GrpStar {
        rho: rho0,
        u: u0,
        v: if classical.u_star >= 0.0 { left.v } else { right.v },
        p: p0,
        d_rho_dt,
        d_u_dt,
        d_p_dt,
    })
}
