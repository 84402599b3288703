use std::ops::{Add, Mul, Neg, Sub};

use super::Uncertain;

impl Add<&Uncertain> for &Uncertain {
    type Output = Uncertain;

    fn add(self, other: &Uncertain) -> Uncertain {
        Uncertain::derived(
            self.nominal() + other.nominal(),
            &[(self, 1.0), (other, 1.0)],
        )
    }
}

impl Sub<&Uncertain> for &Uncertain {
    type Output = Uncertain;

    fn sub(self, other: &Uncertain) -> Uncertain {
        Uncertain::derived(
            self.nominal() - other.nominal(),
            &[(self, 1.0), (other, -1.0)],
        )
    }
}

impl Mul<&Uncertain> for &Uncertain {
    type Output = Uncertain;

    fn mul(self, other: &Uncertain) -> Uncertain {
        Uncertain::derived(
            self.nominal() * other.nominal(),
            &[(self, other.nominal()), (other, self.nominal())],
        )
    }
}

impl Neg for &Uncertain {
    type Output = Uncertain;

    fn neg(self) -> Uncertain {
        Uncertain::derived(-self.nominal(), &[(self, -1.0)])
    }
}

impl Neg for Uncertain {
    type Output = Uncertain;

    fn neg(self) -> Uncertain {
        -&self
    }
}

// Owned and scalar operands all reduce to the by-reference impls above.
macro_rules! forward_binop {
    ($Op:ident, $method:ident) => {
        impl $Op<Uncertain> for Uncertain {
            type Output = Uncertain;

            fn $method(self, other: Uncertain) -> Uncertain {
                (&self).$method(&other)
            }
        }

        impl $Op<&Uncertain> for Uncertain {
            type Output = Uncertain;

            fn $method(self, other: &Uncertain) -> Uncertain {
                (&self).$method(other)
            }
        }

        impl $Op<Uncertain> for &Uncertain {
            type Output = Uncertain;

            fn $method(self, other: Uncertain) -> Uncertain {
                self.$method(&other)
            }
        }

        impl $Op<f64> for &Uncertain {
            type Output = Uncertain;

            fn $method(self, scalar: f64) -> Uncertain {
                self.$method(&Uncertain::exact(scalar))
            }
        }

        impl $Op<f64> for Uncertain {
            type Output = Uncertain;

            fn $method(self, scalar: f64) -> Uncertain {
                (&self).$method(&Uncertain::exact(scalar))
            }
        }

        impl $Op<&Uncertain> for f64 {
            type Output = Uncertain;

            fn $method(self, other: &Uncertain) -> Uncertain {
                (&Uncertain::exact(self)).$method(other)
            }
        }

        impl $Op<Uncertain> for f64 {
            type Output = Uncertain;

            fn $method(self, other: Uncertain) -> Uncertain {
                (&Uncertain::exact(self)).$method(&other)
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_independent_addition_in_quadrature() {
        let a = Uncertain::new(1.0, 0.3).unwrap();
        let b = Uncertain::new(2.0, 0.4).unwrap();

        let sum = &a + &b;
        let difference = &a - &b;

        assert_relative_eq!(sum.nominal(), 3.0, epsilon = EPSILON);
        assert_relative_eq!(sum.sigma(), 0.5, epsilon = EPSILON);
        assert_relative_eq!(difference.nominal(), -1.0, epsilon = EPSILON);
        assert_relative_eq!(difference.sigma(), 0.5, epsilon = EPSILON);
    }

    #[test]
    fn test_correlated_subtraction_cancels() {
        let x = Uncertain::new(4.0, 0.3).unwrap();
        let zero = &x - &x;
        assert_eq!(zero.nominal(), 0.0);
        assert_eq!(zero.sigma(), 0.0);
    }

    #[test]
    fn test_correlated_addition_is_linear() {
        let x = Uncertain::new(4.0, 0.3).unwrap();
        let doubled = &x + &x;
        assert_relative_eq!(doubled.sigma(), 0.6, epsilon = EPSILON);
    }

    #[test]
    fn test_independent_multiplication_uses_relative_quadrature() {
        let a = Uncertain::new(2.0, 0.2).unwrap();
        let b = Uncertain::new(5.0, 0.25).unwrap();
        let product = &a * &b;

        let expected = 10.0 * (0.1_f64.powi(2) + 0.05_f64.powi(2)).sqrt();
        assert_relative_eq!(product.nominal(), 10.0, epsilon = EPSILON);
        assert_relative_eq!(product.sigma(), expected, epsilon = EPSILON);
    }

    #[test]
    fn test_self_product_matches_square() {
        let x = Uncertain::new(3.0, 0.1).unwrap();
        let product = &x * &x;
        let squared = x.powi(2).unwrap();

        assert_relative_eq!(product.nominal(), squared.nominal(), epsilon = EPSILON);
        assert_relative_eq!(product.sigma(), squared.sigma(), epsilon = EPSILON);
        assert_relative_eq!(product.sigma(), 0.6, epsilon = EPSILON);
    }

    #[test]
    fn test_scalar_operands() {
        let x = Uncertain::new(2.0, 0.1).unwrap();

        let scaled = 0.5 * &x;
        assert_relative_eq!(scaled.nominal(), 1.0, epsilon = EPSILON);
        assert_relative_eq!(scaled.sigma(), 0.05, epsilon = EPSILON);

        let shifted = x.clone() - 1.0;
        assert_relative_eq!(shifted.nominal(), 1.0, epsilon = EPSILON);
        assert_relative_eq!(shifted.sigma(), 0.1, epsilon = EPSILON);

        let negated = -x;
        assert_relative_eq!(negated.nominal(), -2.0, epsilon = EPSILON);
        assert_relative_eq!(negated.sigma(), 0.1, epsilon = EPSILON);
    }

    #[test]
    fn test_operands_are_not_mutated() {
        let a = Uncertain::new(1.0, 0.1).unwrap();
        let b = Uncertain::new(2.0, 0.2).unwrap();
        let _ = &a * &b + &a;

        assert_eq!(a.nominal(), 1.0);
        assert_eq!(a.sigma(), 0.1);
        assert_eq!(b.nominal(), 2.0);
        assert_eq!(b.sigma(), 0.2);
    }
}
