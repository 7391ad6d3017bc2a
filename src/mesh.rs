use serde::{Serialize, Deserialize};
use crate::config::{Config, Coordinate};




/// Grid geometry: a 1D ordered sequence of cell-boundary positions, a
/// 2D regular rectangular block, or a 1D radial grid carrying a
/// geometric dimensionality `m` in {1, 2, 3} (planar, cylindrical,
/// spherical source terms).
#[derive(Clone, Serialize, Deserialize)]
pub enum Mesh {
    OneD { vertices: Vec<f64> },
    TwoD { n_x: usize, n_y: usize, dx: f64, dy: f64, x0: f64, y0: f64 },
    Radial { vertices: Vec<f64>, m: u8 },
}




// ============================================================================
impl Mesh {
    pub fn uniform_1d(n: usize, dx: f64, x0: f64) -> Self {
        Mesh::OneD { vertices: (0..=n).map(|j| x0 + dx * j as f64).collect() }
    }

    pub fn uniform_radial(n: usize, dx: f64, r0: f64, m: u8) -> Self {
        Mesh::Radial { vertices: (0..=n).map(|j| r0 + dx * j as f64).collect(), m }
    }

    pub fn uniform_2d(n_x: usize, n_y: usize, dx: f64, dy: f64, x0: f64, y0: f64) -> Self {
        Mesh::TwoD { n_x, n_y, dx, dy, x0, y0 }
    }

    pub fn from_config(config: &Config, coordinate: &Coordinate) -> Self {
        match coordinate {
            Coordinate::Lagrangian | Coordinate::Eulerian if config.is_set(14) && config.n_y() > 1 => {
                Mesh::uniform_2d(config.n_x(), config.n_y(), config.dx(), config.dy(), 0.0, 0.0)
            }
            Coordinate::Lagrangian | Coordinate::Eulerian => {
                Mesh::uniform_1d(config.cell_count(), config.dx(), 0.0)
            }
            Coordinate::Radial(m) => {
                Mesh::uniform_radial(config.cell_count(), config.dx(), 0.0, *m)
            }
        }
    }

    pub fn n_x(&self) -> usize {
        match self {
            Mesh::OneD { vertices } => vertices.len() - 1,
            Mesh::TwoD { n_x, .. } => *n_x,
            Mesh::Radial { vertices, .. } => vertices.len() - 1,
        }
    }

    pub fn n_y(&self) -> usize {
        match self {
            Mesh::OneD { .. } | Mesh::Radial { .. } => 1,
            Mesh::TwoD { n_y, .. } => *n_y,
        }
    }

    /// Width of cell `j` along x (or radius, for the radial case).
    pub fn dx(&self, j: usize) -> f64 {
        match self {
            Mesh::OneD { vertices } => vertices[j + 1] - vertices[j],
            Mesh::TwoD { dx, .. } => *dx,
            Mesh::Radial { vertices, .. } => vertices[j + 1] - vertices[j],
        }
    }

    pub fn dy(&self) -> f64 {
        match self {
            Mesh::OneD { .. } | Mesh::Radial { .. } => 1.0,
            Mesh::TwoD { dy, .. } => *dy,
        }
    }

    /// Radial dimensionality, giving geometric source terms: 1 planar,
    /// 2 cylindrical, 3 spherical. 1D/2D Cartesian grids are planar.
    pub fn geometric_dimensionality(&self) -> u8 {
        match self {
            Mesh::Radial { m, .. } => *m,
            _ => 1,
        }
    }

    pub fn is_radial(&self) -> bool {
        matches!(self, Mesh::Radial { .. })
    }

    /// Position of cell-boundary `j`, for 1D/radial grids.
    pub fn vertex(&self, j: usize) -> f64 {
        match self {
            Mesh::OneD { vertices } | Mesh::Radial { vertices, .. } => vertices[j],
            Mesh::TwoD { dx, x0, .. } => x0 + dx * j as f64,
        }
    }

    /// Cell-center position of cell `j` along x (or radius).
    pub fn cell_center(&self, j: usize) -> f64 {
        0.5 * (self.vertex(j) + self.vertex(j + 1))
    }

    /// `min_j Δx_j` over the grid.
    pub fn smallest_spacing(&self) -> f64 {
        (0..self.n_x())
            .map(|j| self.dx(j))
            .fold(f64::INFINITY, f64::min)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        match self {
            Mesh::OneD { vertices } | Mesh::Radial { vertices, .. } => {
                if vertices.len() < 2 {
                    anyhow::bail!("grid must have at least one cell")
                }
                if vertices.windows(2).any(|w| w[1] <= w[0]) {
                    anyhow::bail!("grid vertices must be strictly increasing")
                }
            }
            Mesh::TwoD { n_x, n_y, dx, dy, .. } => {
                if *n_x == 0 || *n_y == 0 {
                    anyhow::bail!("grid must have at least one cell in each dimension")
                }
                if *dx <= 0.0 || *dy <= 0.0 {
                    anyhow::bail!("grid spacing must be positive")
                }
            }
        }
        Ok(())
    }
}
