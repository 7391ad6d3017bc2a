/**
 * Seam for the equation of state. Only the ideal-gas law is
 * implemented (see Non-goals in spec.md), but the core is written
 * against this trait rather than a hard-coded formula so a future
 * equation of state is a new impl, not a rewrite of the riemann/grp/
 * updater modules.
 */
// ============================================================================
pub trait EquationOfState: Copy {
    fn sound_speed(&self, rho: f64, p: f64, gamma: f64) -> f64;
    fn specific_energy(&self, rho: f64, u: f64, v: f64, p: f64, gamma: f64) -> f64;
    fn pressure(&self, rho: f64, mom_x: f64, mom_y: f64, energy: f64, gamma: f64) -> f64;
}




/**
 * The ideal (gamma-law) gas equation of state, p = (gamma - 1) rho e.
 */
#[derive(Clone, Copy, Debug, Default)]
pub struct IdealGas;




// ============================================================================
impl EquationOfState for IdealGas {
    fn sound_speed(&self, rho: f64, p: f64, gamma: f64) -> f64 {
        (gamma * p / rho).sqrt()
    }

    fn specific_energy(&self, rho: f64, u: f64, v: f64, p: f64, gamma: f64) -> f64 {
        0.5 * (u * u + v * v) + p / (gamma - 1.0) / rho
    }

    fn pressure(&self, rho: f64, mom_x: f64, mom_y: f64, energy: f64, gamma: f64) -> f64 {
        let kinetic = 0.5 * (mom_x * mom_x + mom_y * mom_y) / rho;
        (gamma - 1.0) * (energy - kinetic)
    }
}




#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ideal_gas_round_trips_energy_and_pressure() {
        let eos = IdealGas;
        let (rho, u, v, p, gamma) = (1.0, 0.3, -0.1, 1.0, 1.4);
        let e = eos.specific_energy(rho, u, v, p, gamma);
        let energy = rho * e;
        let mom_x = rho * u;
        let mom_y = rho * v;
        let p2 = eos.pressure(rho, mom_x, mom_y, energy, gamma);
        assert!((p - p2).abs() < 1e-12);
    }
}
