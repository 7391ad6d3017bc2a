/**
 * Boundary-condition applicator (§4.4): materializes ghost primitive
 * values and ghost slopes for a named boundary tag.
 */
use crate::config::BoundaryTag;

#[derive(Clone, Copy, Debug, Default)]
pub struct Ghost {
    pub value: f64,
    pub slope: f64,
}

pub struct EdgeInputs {
    pub initial_value: f64,
    pub near_value: f64,
    pub near_slope: f64,
    pub far_value: f64,
    pub far_slope: f64,
    pub is_normal_velocity: bool,
}

/// Materialize the ghost value and slope just outside one edge of the
/// domain (lo or hi), for the given boundary tag.
pub fn apply(tag: BoundaryTag, at_lo: bool, edge: &EdgeInputs) -> Result<Ghost, crate::app::Error> {
    let effective = match tag {
        BoundaryTag::ReflectiveFree => {
            if at_lo { BoundaryTag::Reflective } else { BoundaryTag::Free }
        }
        other => other,
    };

    Ok(match effective {
        BoundaryTag::Initial => Ghost { value: edge.initial_value, slope: 0.0 },
        BoundaryTag::Reflective => {
            let sign = if edge.is_normal_velocity { -1.0 } else { 1.0 };
            Ghost { value: sign * edge.near_value, slope: sign * edge.near_slope }
        }
        BoundaryTag::Free => Ghost { value: edge.near_value, slope: edge.near_slope },
        BoundaryTag::Periodic => Ghost { value: edge.far_value, slope: edge.far_slope },
        BoundaryTag::ReflectiveFree => unreachable!("resolved above"),
    })
}




#[cfg(test)]
mod test {
    use super::*;

    fn edge(initial: f64, near: f64, far: f64) -> EdgeInputs {
        EdgeInputs {
            initial_value: initial,
            near_value: near,
            near_slope: 0.1,
            far_value: far,
            far_slope: 0.2,
            is_normal_velocity: false,
        }
    }

    #[test]
    fn initial_freezes_to_t0_value_with_zero_slope() {
        let g = apply(BoundaryTag::Initial, true, &edge(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(g.value, 1.0);
        assert_eq!(g.slope, 0.0);
    }

    #[test]
    fn reflective_negates_normal_velocity_only() {
        let mut e = edge(1.0, 2.0, 3.0);
        e.is_normal_velocity = true;
        let g = apply(BoundaryTag::Reflective, true, &e).unwrap();
        assert_eq!(g.value, -2.0);
        assert_eq!(g.slope, -0.1);

        let mut scalar = edge(1.0, 2.0, 3.0);
        scalar.is_normal_velocity = false;
        let g2 = apply(BoundaryTag::Reflective, true, &scalar).unwrap();
        assert_eq!(g2.value, 2.0);
    }

    #[test]
    fn free_copies_near_edge() {
        let g = apply(BoundaryTag::Free, false, &edge(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(g.value, 2.0);
        assert_eq!(g.slope, 0.1);
    }

    #[test]
    fn periodic_wraps_to_far_edge() {
        let g = apply(BoundaryTag::Periodic, true, &edge(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(g.value, 3.0);
        assert_eq!(g.slope, 0.2);
    }

    #[test]
    fn reflective_plus_free_picks_side() {
        let mut e = edge(1.0, 2.0, 3.0);
        e.is_normal_velocity = true;
        let lo = apply(BoundaryTag::ReflectiveFree, true, &e).unwrap();
        let hi = apply(BoundaryTag::ReflectiveFree, false, &e).unwrap();
        assert_eq!(lo.value, -2.0);
        assert_eq!(hi.value, 2.0);
    }
}
