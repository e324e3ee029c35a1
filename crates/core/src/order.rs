//! Scalar order parameters summarizing a configuration of headings.
//!
//! - Polar order: norm of the mean unit vector, in [0, 1].
//! - Nematic order (2-D): norm of the mean doubled-angle unit vector, plus the
//!   director angle. Invariant under flipping any heading by π.
//!
//! Angular means are always taken in the unit-circle embedding; raw angles
//! are never averaged arithmetically.

use crate::error::AmopError;
use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

/// Result of [`nematic_order_2d`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NematicOrder {
    /// Scalar nematic order `S` in [0, 1].
    pub s: f64,
    /// Director angle `psi = 0.5 * atan2(<sin 2θ>, <cos 2θ>)` in radians.
    pub director: f64,
}

/// Polar order of `M` vectors of a common dimension `d` (2 or 3).
///
/// Each vector is normalized before averaging. A zero vector keeps norm 1 for
/// the division, so it contributes the zero vector itself to the mean.
///
/// Returns `AmopError::InvalidShape` for ragged input or `d` outside {2, 3},
/// and `AmopError::EmptyInput` for zero vectors.
pub fn polarization<V: AsRef<[f64]>>(vectors: &[V]) -> Result<f64, AmopError> {
    let first = vectors
        .first()
        .ok_or_else(|| AmopError::EmptyInput("polarization of zero vectors".into()))?;
    let dim = first.as_ref().len();
    if !(2..=3).contains(&dim) {
        return Err(AmopError::InvalidShape {
            expected: "vectors of dimension 2 or 3".into(),
            got: format!("dimension {dim}"),
        });
    }

    let mut sum = [0.0_f64; 3];
    for (idx, v) in vectors.iter().enumerate() {
        let v = v.as_ref();
        if v.len() != dim {
            return Err(AmopError::InvalidShape {
                expected: format!("every vector of dimension {dim}"),
                got: format!("dimension {} at index {idx}", v.len()),
            });
        }
        let norm = unit_norm(v.iter().map(|c| c * c).sum::<f64>().sqrt());
        for (acc, c) in sum.iter_mut().zip(v) {
            *acc += c / norm;
        }
    }

    let m = vectors.len() as f64;
    Ok(sum.iter().map(|s| (s / m).powi(2)).sum::<f64>().sqrt())
}

/// Polar order of 2-D vectors. Same zero-vector policy as [`polarization`].
pub fn polarization_2d(vectors: &[DVec2]) -> Result<f64, AmopError> {
    if vectors.is_empty() {
        return Err(AmopError::EmptyInput("polarization of zero vectors".into()));
    }
    let sum: DVec2 = vectors.iter().map(|v| *v / unit_norm(v.length())).sum();
    Ok((sum / vectors.len() as f64).length())
}

/// Polar order of 3-D vectors. Same zero-vector policy as [`polarization`].
pub fn polarization_3d(vectors: &[DVec3]) -> Result<f64, AmopError> {
    if vectors.is_empty() {
        return Err(AmopError::EmptyInput("polarization of zero vectors".into()));
    }
    let sum: DVec3 = vectors.iter().map(|v| *v / unit_norm(v.length())).sum();
    Ok((sum / vectors.len() as f64).length())
}

/// Polar order parameter `Φ = |<e^{iθ}>|` of a set of headings.
///
/// Returns 0 for an empty slice.
pub fn polar_order_angles(angles: &[f64]) -> f64 {
    if angles.is_empty() {
        return 0.0;
    }
    let n = angles.len() as f64;
    let (c, s) = angles
        .iter()
        .fold((0.0, 0.0), |(c, s), th| (c + th.cos(), s + th.sin()));
    (c / n).hypot(s / n)
}

/// Nematic order parameter and director of 2-D headings.
///
/// `c2 = <cos 2θ>`, `s2 = <sin 2θ>`, `S = hypot(c2, s2)`,
/// `psi = 0.5 * atan2(s2, c2)`. Shifting every angle by π leaves `S`
/// unchanged; the director may move by π/2 under such changes.
pub fn nematic_order_2d(angles: &[f64]) -> Result<NematicOrder, AmopError> {
    if angles.is_empty() {
        return Err(AmopError::EmptyInput("nematic order of zero angles".into()));
    }
    let n = angles.len() as f64;
    let (c2, s2) = angles.iter().fold((0.0, 0.0), |(c, s), th| {
        let (sin, cos) = (2.0 * th).sin_cos();
        (c + cos, s + sin)
    });
    let (c2, s2) = (c2 / n, s2 / n);
    Ok(NematicOrder {
        s: c2.hypot(s2),
        director: 0.5 * s2.atan2(c2),
    })
}

fn unit_norm(norm: f64) -> f64 {
    if norm == 0.0 {
        1.0
    } else {
        norm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prng::Xorshift64;
    use std::f64::consts::PI;

    fn uniform_angles(seed: u64, n: usize) -> Vec<f64> {
        let mut rng = Xorshift64::new(seed);
        (0..n).map(|_| rng.next_range(-PI, PI)).collect()
    }

    fn unit_vectors(angles: &[f64]) -> Vec<[f64; 2]> {
        angles.iter().map(|th| [th.cos(), th.sin()]).collect()
    }

    #[test]
    fn aligned_vectors_have_unit_polarization() {
        let v = unit_vectors(&[0.0; 500]);
        let p = polarization(&v).unwrap();
        assert!((p - 1.0).abs() < 1e-12, "got {p}");
    }

    #[test]
    fn opposite_halves_have_zero_polarization() {
        let mut th = vec![0.0; 250];
        th.extend(std::iter::repeat(PI).take(250));
        let p = polarization(&unit_vectors(&th)).unwrap();
        assert!(p < 1e-6, "got {p}");
    }

    #[test]
    fn polarization_normalizes_vector_lengths() {
        let v = vec![vec![3.0, 0.0], vec![0.5, 0.0], vec![100.0, 0.0]];
        assert!((polarization(&v).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_vector_contributes_itself_to_the_mean() {
        let v = vec![[1.0, 0.0], [0.0, 0.0]];
        let p = polarization(&v).unwrap();
        assert!((p - 0.5).abs() < 1e-12, "got {p}");
        assert!(!p.is_nan());
    }

    #[test]
    fn polarization_accepts_three_dimensions() {
        let v = vec![[0.0, 0.0, 2.0], [0.0, 0.0, 5.0]];
        assert!((polarization(&v).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn polarization_rejects_unsupported_dimension() {
        let v = vec![vec![1.0, 0.0, 0.0, 0.0]];
        assert!(matches!(
            polarization(&v),
            Err(AmopError::InvalidShape { .. })
        ));
        let flat = vec![vec![1.0]];
        assert!(matches!(
            polarization(&flat),
            Err(AmopError::InvalidShape { .. })
        ));
    }

    #[test]
    fn polarization_rejects_ragged_input() {
        let v = vec![vec![1.0, 0.0], vec![1.0, 0.0, 0.0]];
        let err = polarization(&v).unwrap_err();
        assert!(format!("{err}").contains("index 1"), "{err}");
    }

    #[test]
    fn polarization_rejects_empty_input() {
        let v: Vec<[f64; 2]> = Vec::new();
        assert!(matches!(polarization(&v), Err(AmopError::EmptyInput(_))));
        assert!(polarization_2d(&[]).is_err());
        assert!(polarization_3d(&[]).is_err());
    }

    #[test]
    fn typed_helpers_agree_with_slice_version() {
        let th = uniform_angles(11, 300);
        let slices = unit_vectors(&th);
        let typed: Vec<DVec2> = th.iter().map(|t| DVec2::from_angle(*t) * 2.5).collect();
        let a = polarization(&slices).unwrap();
        let b = polarization_2d(&typed).unwrap();
        assert!((a - b).abs() < 1e-12);
        let lifted: Vec<DVec3> = typed.iter().map(|v| v.extend(0.0)).collect();
        assert!((polarization_3d(&lifted).unwrap() - a).abs() < 1e-12);
    }

    #[test]
    fn polar_order_angles_matches_polarization() {
        let th = uniform_angles(3, 400);
        let a = polar_order_angles(&th);
        let b = polarization(&unit_vectors(&th)).unwrap();
        assert!((a - b).abs() < 1e-12);
        assert_eq!(polar_order_angles(&[]), 0.0);
    }

    #[test]
    fn polar_order_is_continuous_across_the_branch_cut() {
        let th = [PI - 1e-3, -PI + 1e-3];
        assert!(polar_order_angles(&th) > 0.999);
    }

    #[test]
    fn rotation_leaves_polarization_unchanged() {
        let th = uniform_angles(0, 500);
        let v = unit_vectors(&th);
        let phi: f64 = 1.234;
        let (s, c) = phi.sin_cos();
        let rotated: Vec<[f64; 2]> = v
            .iter()
            .map(|[x, y]| [c * x - s * y, s * x + c * y])
            .collect();
        let p0 = polarization(&v).unwrap();
        let p1 = polarization(&rotated).unwrap();
        assert!((p0 - p1).abs() < 1e-12, "{p0} vs {p1}");
    }

    #[test]
    fn bidirectional_alignment_has_unit_nematic_order() {
        let mut th = vec![0.0; 500];
        th.extend(std::iter::repeat(PI).take(500));
        let nem = nematic_order_2d(&th).unwrap();
        assert!((nem.s - 1.0).abs() < 1e-12, "got {}", nem.s);
        assert!(nem.director.abs() < 1e-12);
    }

    #[test]
    fn uniform_angles_have_low_nematic_order() {
        let nem = nematic_order_2d(&uniform_angles(2, 2000)).unwrap();
        assert!(nem.s < 0.1, "got {}", nem.s);
    }

    #[test]
    fn pi_shift_leaves_nematic_order_unchanged() {
        let th = uniform_angles(1, 500);
        let shifted: Vec<f64> = th.iter().map(|t| t + PI).collect();
        let a = nematic_order_2d(&th).unwrap();
        let b = nematic_order_2d(&shifted).unwrap();
        assert!((a.s - b.s).abs() < 1e-12, "{} vs {}", a.s, b.s);
    }

    #[test]
    fn director_follows_common_axis() {
        let axis = 0.4;
        let th = [axis, axis + PI, axis, axis + PI];
        let nem = nematic_order_2d(&th).unwrap();
        assert!((nem.director - axis).abs() < 1e-12, "got {}", nem.director);
    }

    #[test]
    fn nematic_rejects_empty_input() {
        assert!(matches!(
            nematic_order_2d(&[]),
            Err(AmopError::EmptyInput(_))
        ));
    }

    mod proptests {
        use super::*;
        use proptest::collection::vec;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn polarization_in_unit_interval(th in vec(-10.0_f64..10.0, 1..200)) {
                let p = polarization(&unit_vectors(&th)).unwrap();
                prop_assert!((0.0..=1.0 + 1e-12).contains(&p), "P = {p}");
            }

            #[test]
            fn polarization_rotation_invariant(
                th in vec(-PI..PI, 1..200),
                phi in -PI..PI,
            ) {
                let shifted: Vec<f64> = th.iter().map(|t| t + phi).collect();
                let a = polarization(&unit_vectors(&th)).unwrap();
                let b = polarization(&unit_vectors(&shifted)).unwrap();
                prop_assert!((a - b).abs() < 1e-12, "{a} vs {b}");
            }

            #[test]
            fn polarization_rotation_invariant_in_3d(
                v in vec(prop::array::uniform3(-1.0_f64..1.0), 1..100),
                (a, b, c) in (-PI..PI, -PI..PI, -PI..PI),
            ) {
                let q = glam::DQuat::from_euler(glam::EulerRot::XYZ, a, b, c);
                let rotated: Vec<[f64; 3]> = v
                    .iter()
                    .map(|u| (q * DVec3::from_array(*u)).to_array())
                    .collect();
                let p0 = polarization(&v).unwrap();
                let p1 = polarization(&rotated).unwrap();
                prop_assert!((p0 - p1).abs() < 1e-12, "{p0} vs {p1}");
            }

            #[test]
            fn nematic_invariant_under_pi_flips(
                th in vec(-PI..PI, 1..200),
                flips in vec(any::<bool>(), 200),
            ) {
                let flipped: Vec<f64> = th
                    .iter()
                    .zip(&flips)
                    .map(|(t, f)| if *f { t + PI } else { *t })
                    .collect();
                let a = nematic_order_2d(&th).unwrap();
                let b = nematic_order_2d(&flipped).unwrap();
                prop_assert!((a.s - b.s).abs() < 1e-12);
                prop_assert!((0.0..=1.0 + 1e-12).contains(&a.s));
            }
        }
    }
}
