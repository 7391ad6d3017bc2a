use serde::{Serialize, Deserialize};


/// Number of addressable configuration slots. Slot 0 is the
/// dimensionality flag; slots are 1-indexed beyond that to mirror the
/// `config[n]=C` CLI grammar and the `config.txt` file format.
pub const N_CONF: usize = 128;


/// The process-wide configuration vector: a fixed array of numeric
/// slots, built once from `config.txt` plus CLI overrides and then
/// passed by reference through the march. Slots that were never
/// assigned read back as positive infinity ("not set").
///
/// This mirrors the original program's `double config[N_CONF]` global,
/// but as an explicit, non-global, immutable-after-construction value
/// (see DESIGN.md, "Global configuration array").
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    slots: [f64; N_CONF],
}

impl Config {
    pub fn new() -> Self {
        Self { slots: [f64::INFINITY; N_CONF] }
    }

    pub fn get(&self, slot: usize) -> f64 {
        self.slots[slot]
    }

    pub fn set(&mut self, slot: usize, value: f64) {
        self.slots[slot] = value;
    }

    pub fn is_set(&self, slot: usize) -> bool {
        self.slots[slot].is_finite()
    }

    pub fn apply_assignment(&mut self, slot: usize, value: f64) -> Result<(), crate::app::Error> {
        if slot >= N_CONF {
            return Err(crate::app::Error::Argument(format!("config slot {} out of range", slot)));
        }
        self.slots[slot] = value;
        Ok(())
    }

    // ---- named accessors for the slots consumed by the core (§6) ----

    pub fn t_end(&self) -> f64 { self.get(1) }
    pub fn cell_count(&self) -> usize { self.get(3) as usize }
    pub fn eps(&self) -> f64 { self.get(4) }
    pub fn n_max(&self) -> usize { self.get(5) as usize }
    pub fn gamma_a(&self) -> f64 { self.get(6) }
    pub fn cfl(&self) -> f64 { self.get(7) }
    pub fn is_lagrangian(&self) -> bool { self.get(8) == 1.0 }
    pub fn scheme_order(&self) -> usize { self.get(9) as usize }
    pub fn dx(&self) -> f64 { self.get(10) }
    pub fn dy(&self) -> f64 { self.get(11) }
    pub fn n_x(&self) -> usize { self.get(13) as usize }
    pub fn n_y(&self) -> usize { self.get(14) as usize }
    pub fn fixed_dt(&self) -> Option<f64> {
        let v = self.get(16);
        if v.is_finite() && v > 0.0 { Some(v) } else { None }
    }
    pub fn x_boundary(&self) -> f64 { self.get(17) }
    pub fn y_boundary(&self) -> f64 { self.get(18) }
    pub fn minmod_alpha(&self) -> f64 { self.get(41) }
    pub fn gamma_b(&self) -> f64 { self.get(106) }

    /// Not part of the slot table; no dedicated slot was surfaced for it.
    pub fn riemann_tolerance(&self) -> f64 { 1e-6 }
    pub fn riemann_iteration_cap(&self) -> usize { 100 }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}




/// Boundary condition tag, decoded from the numeric encoding of §6.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundaryTag {
    Initial,
    Reflective,
    Free,
    Periodic,
    ReflectiveFree,
}

impl BoundaryTag {
    pub fn decode(code: f64) -> Result<Self, crate::app::Error> {
        match code as i64 {
            -1 => Ok(BoundaryTag::Initial),
            -2 => Ok(BoundaryTag::Reflective),
            -4 => Ok(BoundaryTag::Free),
            -5 => Ok(BoundaryTag::Periodic),
            -24 => Ok(BoundaryTag::ReflectiveFree),
            other => Err(crate::app::Error::UnknownBoundary(other)),
        }
    }
}




/// Which optional field layout a run carries, replacing the original's
/// `MULTIFLUID_BASICS` / `MULTIPHASE_BASICS` preprocessor switches
/// (see DESIGN.md, "Preprocessor feature switches").
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Capability {
    SingleFluid,
    MultiFluid,
    MultiPhase,
}




/// Numerical scheme selection, decoded from the CLI's order tag
/// (`1[_<scheme>]` or `2[_<scheme>]`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemeOrder {
    First(RiemannScheme),
    Second,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiemannScheme {
    RiemannExact,
    Godunov,
}

impl SchemeOrder {
    pub fn parse(tag: &str) -> Result<Self, crate::app::Error> {
        let mut parts = tag.splitn(2, '_');
        let order = parts.next().unwrap_or("");
        let scheme = parts.next();
        match (order, scheme) {
            ("1", None) | ("1", Some("Riemann_exact")) => Ok(SchemeOrder::First(RiemannScheme::RiemannExact)),
            ("1", Some("Godunov")) => Ok(SchemeOrder::First(RiemannScheme::Godunov)),
            ("2", None) | ("2", Some("GRP")) => Ok(SchemeOrder::Second),
            _ => Err(crate::app::Error::Argument(format!("unrecognized order tag '{}'", tag))),
        }
    }
}




/// Coordinate/dimension tag: Lagrangian or Eulerian 1D, or a radial
/// spherical-symmetry dimensionality M in {1, 2, 3}.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Coordinate {
    Lagrangian,
    Eulerian,
    Radial(u8),
}

impl Coordinate {
    pub fn parse(tag: &str) -> Result<Self, crate::app::Error> {
        match tag {
            "LAG" => Ok(Coordinate::Lagrangian),
            "EUL" => Ok(Coordinate::Eulerian),
            "1" => Ok(Coordinate::Radial(1)),
            "2" => Ok(Coordinate::Radial(2)),
            "3" => Ok(Coordinate::Radial(3)),
            _ => Err(crate::app::Error::Argument(format!("unrecognized coordinate tag '{}'", tag))),
        }
    }
}
