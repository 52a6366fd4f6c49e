/// 3-vector helpers used to build camera bases and rotation axes
pub type Vector = [f32; 3];

/// Euclidean length of `v`
pub fn vector_modulus(v: &Vector) -> f32 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

/// `v` scaled to unit length.
///
/// The zero vector has no direction; passing it yields NaN components.
pub fn unit_vector(v: &Vector) -> Vector {
    let modulus = vector_modulus(v);
    v.map(|c| c / modulus)
}

/// Right-handed cross product `a × b`
pub fn cross_product(a: &Vector, b: &Vector) -> Vector {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Component-wise `a - b`
pub fn difference(a: &Vector, b: &Vector) -> Vector {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn test_unit_vector_has_unit_length() {
        for v in [[3.0, 4.0, 0.0], [1.0, 1.0, 2.0], [-0.2, 7.5, -3.0]] {
            let u = unit_vector(&v);
            assert!((vector_modulus(&u) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_unit_vector_of_zero_is_nan() {
        let u = unit_vector(&[0.0, 0.0, 0.0]);
        assert!(u.iter().all(|c| c.is_nan()));
    }

    #[test]
    fn test_cross_product_anticommutes() {
        let a = [1.0, 2.0, 3.0];
        let b = [-4.0, 0.5, 2.0];
        let ab = cross_product(&a, &b);
        let ba = cross_product(&b, &a);
        for i in 0..3 {
            assert!((ab[i] + ba[i]).abs() < 1e-6);
        }
    }

    #[test]
    fn test_cross_product_matches_nalgebra() {
        let a = [0.3, -1.0, 2.0];
        let b = [1.5, 0.25, -0.75];
        let expected = Vector3::from(a).cross(&Vector3::from(b));
        let actual = cross_product(&a, &b);
        assert!((Vector3::from(actual) - expected).norm() < 1e-6);
    }

    #[test]
    fn test_basis_vectors() {
        assert_eq!(cross_product(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]), [0.0, 0.0, 1.0]);
        assert_eq!(vector_modulus(&[3.0, 4.0, 0.0]), 5.0);
        assert_eq!(difference(&[1.0, 1.0, 2.0], &[0.0, 1.0, 0.5]), [1.0, 0.0, 1.5]);
    }
}
