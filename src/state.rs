/**
 * The cell-centered field, its optional multi-fluid/multi-phase extra
 * data (§3's "Capability" tagged layout), per-cell slopes, and the
 * preallocated snapshot history the controller writes into (§3,
 * "Lifecycles").
 */
use ndarray::Array2;
use serde::{Serialize, Deserialize};
use crate::physics::wood_harmonic_gamma;




// ============================================================================
/// The optional second set of fields carried alongside {rho, u, v, p},
/// selected once at startup by the run's `Capability` (§9's
/// preprocessor-switch note).
#[derive(Clone, Serialize, Deserialize)]
pub enum Extra {
    SingleFluid { gamma: f64 },
    /// A scalar tracer phi blending two gases sharing every cell; the
    /// per-cell mixture gamma is a volume-weighted (not harmonic) mean,
    /// distinguishing it from the multi-phase Wood mean below (see
    /// DESIGN.md).
    MultiFluid { gamma_a: f64, gamma_b: f64, phi: Array2<f64> },
    /// A second, coexisting phase-b primitive state plus the volume
    /// fraction z_a of phase a.
    MultiPhase {
        gamma_a: f64,
        gamma_b: f64,
        rho_b: Array2<f64>,
        u_b: Array2<f64>,
        v_b: Array2<f64>,
        p_b: Array2<f64>,
        z_a: Array2<f64>,
    },
}

#[derive(Clone, Serialize, Deserialize)]
pub struct Field {
    pub rho: Array2<f64>,
    pub u: Array2<f64>,
    pub v: Array2<f64>,
    pub p: Array2<f64>,
    pub extra: Extra,
}




// ============================================================================
impl Field {
    pub fn new_single_fluid(n_x: usize, n_y: usize, gamma: f64) -> Self {
        Field {
            rho: Array2::zeros((n_x, n_y)),
            u: Array2::zeros((n_x, n_y)),
            v: Array2::zeros((n_x, n_y)),
            p: Array2::zeros((n_x, n_y)),
            extra: Extra::SingleFluid { gamma },
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        self.rho.dim()
    }

    /// The per-cell adiabatic index (§4.6: "Recompute per-cell gamma
    /// for multi-fluid via the Wood-type harmonic mean of phase
    /// gamma's when a volume fraction is present").
    pub fn gamma_at(&self, i: usize, j: usize) -> f64 {
        match &self.extra {
            Extra::SingleFluid { gamma } => *gamma,
            Extra::MultiFluid { gamma_a, gamma_b, phi } => {
                let z = phi[[i, j]].clamp(0.0, 1.0);
                z * gamma_a + (1.0 - z) * gamma_b
            }
            Extra::MultiPhase { gamma_a, gamma_b, z_a, .. } => {
                wood_harmonic_gamma(*gamma_a, *gamma_b, z_a[[i, j]].clamp(1e-12, 1.0 - 1e-12))
            }
        }
    }
}

// ============================================================================
/// One time-indexed snapshot (§3, "Cell-centered field per time
/// snapshot"), plus the per-step CPU time the controller measured to
/// reach it (§4.7).
#[derive(Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub time: f64,
    pub cpu_seconds: f64,
    pub field: Field,
}




// ============================================================================
/// `Vec<Option<Snapshot>>` sized to N up front: snapshot 0 is filled by
/// the loader, 1..N-1 by the controller in order, and Rust has no
/// "allocated but not yet initialized" array to model that directly.
#[derive(Clone, Serialize, Deserialize)]
pub struct History {
    snapshots: Vec<Option<Snapshot>>,
}




// ============================================================================
impl History {
    pub fn with_capacity(n: usize) -> Self {
        History { snapshots: vec![None; n] }
    }

    pub fn set(&mut self, index: usize, snapshot: Snapshot) {
        self.snapshots[index] = Some(snapshot);
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots[index].as_ref()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Snapshots actually written so far, in order.
    pub fn written(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter().filter_map(|s| s.as_ref())
    }
}




#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn single_fluid_gamma_is_constant() {
        let field = Field::new_single_fluid(4, 1, 1.4);
        assert_eq!(field.gamma_at(0, 0), 1.4);
        assert_eq!(field.gamma_at(3, 0), 1.4);
    }

    #[test]
    fn multiphase_gamma_uses_wood_mean_at_pure_phase() {
        let mut z_a = Array2::zeros((2, 1));
        z_a[[0, 0]] = 1.0;
        z_a[[1, 0]] = 0.0;
        let field = Field {
            rho: Array2::zeros((2, 1)),
            u: Array2::zeros((2, 1)),
            v: Array2::zeros((2, 1)),
            p: Array2::zeros((2, 1)),
            extra: Extra::MultiPhase {
                gamma_a: 1.4, gamma_b: 5.0 / 3.0,
                rho_b: Array2::zeros((2, 1)), u_b: Array2::zeros((2, 1)),
                v_b: Array2::zeros((2, 1)), p_b: Array2::zeros((2, 1)),
                z_a,
            },
        };
        assert!((field.gamma_at(0, 0) - 1.4).abs() < 1e-6);
        assert!((field.gamma_at(1, 0) - 5.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn history_preserves_last_good_snapshot_after_partial_fill() {
        let mut history = History::with_capacity(3);
        history.set(0, Snapshot { time: 0.0, cpu_seconds: 0.0, field: Field::new_single_fluid(2, 1, 1.4) });
        history.set(1, Snapshot { time: 0.1, cpu_seconds: 0.01, field: Field::new_single_fluid(2, 1, 1.4) });
        assert_eq!(history.written().count(), 2);
        assert!(history.get(2).is_none());
    }
}
