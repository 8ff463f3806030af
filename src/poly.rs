//! Dense univariate polynomials over any [Domain](crate::domains::generic::Domain).
//!
//! Multivariate polynomials are obtained by nesting polynomial rings, for example `Z[x][y]`.
//! Multiplication picks one of three kernels based on the rectangular hull of the nested
//! operands; the kernels always produce identical results.

pub mod dense;
pub mod division;
pub mod gcd;
pub mod mul;

/// Thresholds that select the multiplication kernel.
///
/// The defaults are empirical tuning constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MulThresholds {
    /// The minimal percentage of nonzero leaves in the rectangular hull of both
    /// operands for Kronecker substitution.
    pub kronecker_density_percent: usize,
    /// The minimal degree in any of the nested variables for Kronecker substitution.
    pub kronecker_min_degree: usize,
    /// The maximal degree per variable for flat accumulation.
    pub flat_2d_max_degree: usize,
}

impl Default for MulThresholds {
    fn default() -> Self {
        MulThresholds {
            kronecker_density_percent: 10,
            kronecker_min_degree: 50,
            flat_2d_max_degree: 25,
        }
    }
}

/// Settings of a [PolynomialRing](dense::PolynomialRing).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PolynomialConfig {
    pub mul: MulThresholds,
    /// The minimal quotient length for which division uses Newton iteration.
    pub divrem_newton_cutoff: usize,
    /// The maximal length of randomly sampled polynomials.
    pub sample_max_length: usize,
}

impl Default for PolynomialConfig {
    fn default() -> Self {
        PolynomialConfig {
            mul: MulThresholds::default(),
            divrem_newton_cutoff: 32,
            sample_max_length: 4,
        }
    }
}

/// A polynomial multiplication kernel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MulStrategy {
    /// Schoolbook convolution over the coefficient ring.
    Classical,
    /// Accumulate the products of two nested variables over a word modulus
    /// in wide buckets and reduce once.
    Flat2D,
    /// Pack all leaves in a single integer and multiply once.
    Kronecker,
}
