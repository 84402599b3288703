use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::errors::ModelError;

static NEXT_VARIABLE_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of an independent root quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct VariableId(u64);

impl VariableId {
    fn next() -> Self {
        VariableId(NEXT_VARIABLE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug)]
struct Root {
    sigma: f64,
    label: Option<Arc<str>>,
}

#[derive(Debug, Clone)]
struct Sensitivity {
    derivative: f64,
    root: Arc<Root>,
}

/// Share of a quantity's uncertainty owed to one root quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorComponent {
    pub label: Option<String>,
    pub contribution: f64,
}

/// A nominal value with a propagated standard deviation.
#[derive(Debug, Clone)]
pub struct Uncertain {
    nominal: f64,
    sigma: f64,
    sensitivities: BTreeMap<VariableId, Sensitivity>,
}

impl Uncertain {
    /// Creates an independent measured quantity.
    ///
    /// A zero `sigma` yields an exact value. Non-finite values and negative
    /// sigmas are rejected.
    pub fn new(nominal: f64, sigma: f64) -> Result<Self, ModelError> {
        Self::validated(None, nominal, sigma)
    }

    /// Same as [`Uncertain::new`], tagging the root so it can be named in
    /// [`Uncertain::error_components`].
    pub fn labeled(label: &str, nominal: f64, sigma: f64) -> Result<Self, ModelError> {
        Self::validated(Some(label), nominal, sigma)
    }

    /// An exact value with no uncertainty and no root identity.
    pub fn exact(nominal: f64) -> Self {
        Uncertain {
            nominal,
            sigma: 0.0,
            sensitivities: BTreeMap::new(),
        }
    }

    fn validated(label: Option<&str>, nominal: f64, sigma: f64) -> Result<Self, ModelError> {
        if !nominal.is_finite() {
            return Err(ModelError::InvalidInput(format!(
                "nominal value must be finite, got {}",
                nominal
            )));
        }
        if !sigma.is_finite() || sigma < 0.0 {
            return Err(ModelError::InvalidInput(format!(
                "uncertainty must be finite and non-negative, got {}",
                sigma
            )));
        }
        Ok(Self::root(label, nominal, sigma))
    }

    pub(crate) fn root(label: Option<&str>, nominal: f64, sigma: f64) -> Self {
        if sigma == 0.0 {
            return Self::exact(nominal);
        }

        let root = Arc::new(Root {
            sigma,
            label: label.map(Arc::from),
        });
        let mut sensitivities = BTreeMap::new();
        sensitivities.insert(
            VariableId::next(),
            Sensitivity {
                derivative: 1.0,
                root,
            },
        );

        Uncertain {
            nominal,
            sigma,
            sensitivities,
        }
    }

    /// Builds `f(operands)` from its nominal value and the partial derivative of
    /// `f` with respect to each operand (chain rule onto the shared roots).
    pub(crate) fn derived(nominal: f64, parts: &[(&Uncertain, f64)]) -> Self {
        let mut sensitivities: BTreeMap<VariableId, Sensitivity> = BTreeMap::new();

        for (operand, partial) in parts {
            if *partial == 0.0 {
                continue;
            }
            for (id, sensitivity) in &operand.sensitivities {
                let derivative = partial * sensitivity.derivative;
                sensitivities
                    .entry(*id)
                    .and_modify(|existing| existing.derivative += derivative)
                    .or_insert_with(|| Sensitivity {
                        derivative,
                        root: Arc::clone(&sensitivity.root),
                    });
            }
        }
        sensitivities.retain(|_, sensitivity| sensitivity.derivative != 0.0);

        let variance: f64 = sensitivities
            .values()
            .map(|s| (s.derivative * s.root.sigma).powi(2))
            .sum();

        Uncertain {
            nominal,
            sigma: variance.sqrt(),
            sensitivities,
        }
    }

    pub fn nominal(&self) -> f64 {
        self.nominal
    }

    /// One standard deviation.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn is_exact(&self) -> bool {
        self.sigma == 0.0
    }

    /// `sigma / |nominal|`, or `None` for a zero nominal.
    pub fn relative_sigma(&self) -> Option<f64> {
        if self.nominal == 0.0 {
            None
        } else {
            Some(self.sigma / self.nominal.abs())
        }
    }

    /// Distance of `value` from the nominal in standard deviations.
    pub fn std_score(&self, value: f64) -> Option<f64> {
        if self.sigma == 0.0 {
            None
        } else {
            Some((value - self.nominal) / self.sigma)
        }
    }

    /// Contribution `|df/dx_i| * sigma_i` of every root, largest first.
    pub fn error_components(&self) -> Vec<ErrorComponent> {
        let mut components: Vec<ErrorComponent> = self
            .sensitivities
            .values()
            .map(|s| ErrorComponent {
                label: s.root.label.as_deref().map(str::to_owned),
                contribution: (s.derivative * s.root.sigma).abs(),
            })
            .collect();
        components.sort_by(|a, b| b.contribution.total_cmp(&a.contribution));
        components
    }

    pub fn covariance(&self, other: &Uncertain) -> f64 {
        self.sensitivities
            .iter()
            .filter_map(|(id, mine)| {
                other
                    .sensitivities
                    .get(id)
                    .map(|theirs| mine.derivative * theirs.derivative * mine.root.sigma.powi(2))
            })
            .sum()
    }

    /// Pearson correlation, undefined when either side is exact.
    pub fn correlation(&self, other: &Uncertain) -> Option<f64> {
        if self.sigma == 0.0 || other.sigma == 0.0 {
            return None;
        }
        Some(self.covariance(other) / (self.sigma * other.sigma))
    }

    /// Division; fails when the divisor's nominal is exactly zero.
    pub fn checked_div(&self, divisor: &Uncertain) -> Result<Uncertain, ModelError> {
        if divisor.nominal == 0.0 {
            return Err(ModelError::DivisionByZero(format!(
                "cannot divide {} by a zero nominal",
                self
            )));
        }
        let quotient = self.nominal / divisor.nominal;
        Ok(Uncertain::derived(
            quotient,
            &[
                (self, 1.0 / divisor.nominal),
                (divisor, -quotient / divisor.nominal),
            ],
        ))
    }

    /// `self^exponent` for a constant exponent.
    pub fn powf(&self, exponent: f64) -> Result<Uncertain, ModelError> {
        let value = self.nominal.powf(exponent);
        let derivative = if exponent == 0.0 {
            0.0
        } else {
            exponent * self.nominal.powf(exponent - 1.0)
        };

        if !value.is_finite() || !derivative.is_finite() {
            return Err(ModelError::Domain(format!(
                "cannot raise {} to the power {}",
                self.nominal, exponent
            )));
        }
        Ok(Uncertain::derived(value, &[(self, derivative)]))
    }

    pub fn powi(&self, exponent: i32) -> Result<Uncertain, ModelError> {
        self.powf(exponent as f64)
    }

    /// Natural logarithm.
    pub fn ln(&self) -> Result<Uncertain, ModelError> {
        if self.nominal <= 0.0 {
            return Err(ModelError::Domain(format!(
                "logarithm of non-positive value {}",
                self.nominal
            )));
        }
        Ok(Uncertain::derived(
            self.nominal.ln(),
            &[(self, 1.0 / self.nominal)],
        ))
    }

    /// The operand with the smaller nominal (`self` on ties).
    pub fn min_nominal<'a>(&'a self, other: &'a Uncertain) -> &'a Uncertain {
        if other.nominal < self.nominal {
            other
        } else {
            self
        }
    }
}

impl From<f64> for Uncertain {
    fn from(nominal: f64) -> Self {
        Uncertain::exact(nominal)
    }
}

impl fmt::Display for Uncertain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(precision) => write!(
                f,
                "{:.*}+/-{:.*}",
                precision, self.nominal, precision, self.sigma
            ),
            None => write!(f, "{}+/-{}", self.nominal, self.sigma),
        }
    }
}
