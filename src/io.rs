/**
 * The input/output collaborator (§6): reads `config.txt` and the
 * per-variable field files, detects which `Capability` a run's field
 * files imply, and writes the snapshot history back out. Field I/O
 * itself sits outside this system's scope; what's here is the minimal
 * text-file implementation needed to run the CLI end-to-end.
 */
use std::path::{Path, PathBuf};

use ndarray::{Array2, Axis};

use crate::app::Error;
use crate::config::{Capability, Config};
use crate::state::{Extra, Field, History};

fn locate_variable_file(dir: &Path, name: &str) -> Result<PathBuf, Error> {
    let txt = dir.join(format!("{}.txt", name));
    if txt.is_file() {
        return Ok(txt);
    }
    let dat = dir.join(format!("{}.dat", name));
    if dat.is_file() {
        return Ok(dat);
    }
    Err(Error::IoPath(format!("missing {}.txt (or .dat) under {}", name, dir.display())))
}

fn file_exists(dir: &Path, name: &str) -> bool {
    dir.join(format!("{}.txt", name)).is_file() || dir.join(format!("{}.dat", name)).is_file()
}





// ============================================================================
/// Read one variable's whitespace-separated doubles and reshape them
/// row-major into an `n_x` by `n_y` array (§6: "plain-text file...
/// whitespace-separated doubles, row-major for 2D").
fn read_variable(dir: &Path, name: &str, n_x: usize, n_y: usize) -> Result<Array2<f64>, Error> {
    let path = locate_variable_file(dir, name)?;
    let text = std::fs::read_to_string(&path).map_err(|e| Error::IoPath(format!("{}: {}", path.display(), e)))?;
    let values: Result<Vec<f64>, _> = text.split_whitespace().map(|tok| tok.parse::<f64>()).collect();
    let values = values.map_err(|e| Error::IoData(format!("{}: {}", path.display(), e)))?;
    if values.len() != n_x * n_y {
        return Err(Error::IoData(format!(
            "{} has {} values, expected {} ({}x{})", path.display(), values.len(), n_x * n_y, n_x, n_y,
        )));
    }
    Array2::from_shape_vec((n_x, n_y), values).map_err(|e| Error::IoData(e.to_string()))
}

/// Which `Capability` a run's input directory implies: a phase-b state
/// plus `Z_a.txt` means multi-phase, a lone `PHI.txt` means multi-fluid,
/// otherwise single-fluid (§3's "Capability" tagged layout).
pub fn detect_capability(dir: &Path) -> Result<Capability, Error> {
    if file_exists(dir, "Z_a") {
        Ok(Capability::MultiPhase)
    } else if file_exists(dir, "PHI") {
        Ok(Capability::MultiFluid)
    } else {
        Ok(Capability::SingleFluid)
    }
}





// ============================================================================
/// Parse `config.txt`: one `<slot> <value>` assignment per line,
/// `#`-prefixed lines ignored (§6).
pub fn load_config(dir: &Path) -> Result<Config, Error> {
    let path = dir.join("config.txt");
    let text = std::fs::read_to_string(&path).map_err(|e| Error::IoPath(format!("{}: {}", path.display(), e)))?;

    let mut config = Config::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut parts = line.split_whitespace();
        let slot = parts.next()
            .ok_or_else(|| Error::IoData(format!("config.txt:{}: missing slot index", lineno + 1)))?
            .parse::<usize>()
            .map_err(|_| Error::IoData(format!("config.txt:{}: malformed slot index", lineno + 1)))?;
        let value = parts.next()
            .ok_or_else(|| Error::IoData(format!("config.txt:{}: missing value", lineno + 1)))?
            .parse::<f64>()
            .map_err(|_| Error::IoData(format!("config.txt:{}: malformed value", lineno + 1)))?;
        config.apply_assignment(slot, value)?;
    }
    Ok(config)
}





// ============================================================================
/// Load the field variables a run's `Capability` requires, validating
/// that they all agree in count/columns/lines (enforced implicitly by
/// `read_variable`'s shape check against the caller-supplied `n_x`,
/// `n_y`).
pub fn load_field(dir: &Path, capability: Capability, n_x: usize, n_y: usize, gamma_a: f64, gamma_b: f64) -> Result<Field, Error> {
    let rho = read_variable(dir, "RHO", n_x, n_y)?;
    let u = read_variable(dir, "U", n_x, n_y)?;
    let v = if file_exists(dir, "V") { read_variable(dir, "V", n_x, n_y)? } else { Array2::zeros((n_x, n_y)) };
    let p = read_variable(dir, "P", n_x, n_y)?;

    let extra = match capability {
        Capability::SingleFluid => Extra::SingleFluid { gamma: gamma_a },
        Capability::MultiFluid => {
            let phi = read_variable(dir, "PHI", n_x, n_y)?;
            Extra::MultiFluid { gamma_a, gamma_b, phi }
        }
        Capability::MultiPhase => {
            let z_a = read_variable(dir, "Z_a", n_x, n_y)?;
            let rho_b = read_variable(dir, "RHO_b", n_x, n_y)?;
            let u_b = read_variable(dir, "U_b", n_x, n_y)?;
            let v_b = if file_exists(dir, "V_b") { read_variable(dir, "V_b", n_x, n_y)? } else { Array2::zeros((n_x, n_y)) };
            let p_b = read_variable(dir, "P_b", n_x, n_y)?;
            Extra::MultiPhase { gamma_a, gamma_b, rho_b, u_b, v_b, p_b, z_a }
        }
    };

    Ok(Field { rho, u, v, p, extra })
}

fn write_variable(dir: &Path, name: &str, data: &Array2<f64>) -> Result<(), Error> {
    let mut text = String::new();
    for row in data.axis_iter(Axis(0)) {
        let line: Vec<String> = row.iter().map(|value| value.to_string()).collect();
        text.push_str(&line.join(" "));
        text.push('\n');
    }
    std::fs::write(dir.join(format!("{}.txt", name)), text)
        .map_err(|e| Error::IoPath(format!("{}: {}", dir.join(format!("{}.txt", name)).display(), e)))
}





// ============================================================================
/// Write one `<output>/<nt>/` directory per recorded snapshot plus a
/// top-level `cpu_time.txt` (§6).
pub fn write_output(dir: &Path, history: &History) -> Result<(), Error> {
    std::fs::create_dir_all(dir).map_err(|e| Error::IoPath(format!("{}: {}", dir.display(), e)))?;

    let mut cpu_times = String::new();
    for (nt, snapshot) in history.written().enumerate() {
        let snap_dir = dir.join(nt.to_string());
        std::fs::create_dir_all(&snap_dir).map_err(|e| Error::IoPath(format!("{}: {}", snap_dir.display(), e)))?;
        write_variable(&snap_dir, "RHO", &snapshot.field.rho)?;
        write_variable(&snap_dir, "U", &snapshot.field.u)?;
        write_variable(&snap_dir, "V", &snapshot.field.v)?;
        write_variable(&snap_dir, "P", &snapshot.field.p)?;
        cpu_times.push_str(&format!("{}\n", snapshot.cpu_seconds));
    }
    std::fs::write(dir.join("cpu_time.txt"), cpu_times)
        .map_err(|e| Error::IoPath(format!("{}: {}", dir.join("cpu_time.txt").display(), e)))
}




#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    fn tempdir() -> PathBuf {
        let mut dir = std::env::temp_dir();
        dir.push(format!("grp_hydro_io_test_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn config_parses_slots_and_ignores_comments() {
        let dir = tempdir();
        let mut f = std::fs::File::create(dir.join("config.txt")).unwrap();
        writeln!(f, "# a comment").unwrap();
        writeln!(f, "1 0.2").unwrap();
        writeln!(f, "3 100").unwrap();
        let config = load_config(&dir).unwrap();
        assert!((config.t_end() - 0.2).abs() < 1e-12);
        assert_eq!(config.cell_count(), 100);
    }

    #[test]
    fn variable_shape_mismatch_is_reported() {
        let dir = tempdir();
        std::fs::write(dir.join("RHO.txt"), "1.0 2.0 3.0").unwrap();
        let result = read_variable(&dir, "RHO", 2, 2);
        assert!(matches!(result, Err(Error::IoData(_))));
    }

    #[test]
    fn detects_multiphase_over_multifluid_when_both_present() {
        let dir = tempdir();
        std::fs::write(dir.join("PHI.txt"), "1.0").unwrap();
        std::fs::write(dir.join("Z_a.txt"), "1.0").unwrap();
        assert_eq!(detect_capability(&dir).unwrap(), Capability::MultiPhase);
    }

    #[test]
    fn missing_file_is_a_path_error() {
        let dir = tempdir();
        let result = read_variable(&dir, "RHO", 2, 2);
        assert!(matches!(result, Err(Error::IoPath(_))));
    }
}
