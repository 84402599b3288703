//! Values carrying a 1-sigma uncertainty with first-order, correlation-aware
//! error propagation.
//!
//! Every [`Uncertain`] records its nominal value together with the linear
//! sensitivity `df/dx_i` to each independent root quantity `x_i` it was built
//! from. The uncertainty of a derived value is
//!
//! ```text
//! sigma_f = sqrt(sum_i (df/dx_i * sigma_i)^2)
//! ```
//!
//! with every root counted exactly once, no matter how many times it occurs in
//! the expression. `x / x` and `x - x` therefore carry no uncertainty, and
//! independent operands reduce to the usual quadrature rules.
//!
//! ```
//! use water_rocket::Uncertain;
//!
//! let x = Uncertain::new(2.0, 0.1).unwrap();
//! let ratio = x.checked_div(&x).unwrap();
//! assert_eq!(ratio.nominal(), 1.0);
//! assert_eq!(ratio.sigma(), 0.0);
//! ```

mod ops;
mod quantity;

pub use quantity::{ErrorComponent, Uncertain};
