//! Truncated exponential generating functions over exact integers.
//!
//! A series is stored by its labeled coefficients `a_n = n! [x^n] f(x)`, which
//! stay integral for every series built here. The EGF product then becomes a
//! binomial convolution, `(f g)_n = sum_i C(n, i) f_i g_(n - i)`, so powers of
//! a series never leave integer arithmetic.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::combinatorics::BinomialTable;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabeledSeries {
    coeffs: Vec<BigUint>,
}

impl LabeledSeries {
    /// The constant series 1, truncated after `degree`.
    pub fn one(degree: usize) -> Self {
        let mut coeffs = vec![BigUint::zero(); degree + 1];
        coeffs[0] = BigUint::one();
        Self { coeffs }
    }

    /// `sum_{j = 1..=max_block} x^j / j!`: one block of any size up to
    /// `max_block`.
    pub fn block_sizes(max_block: usize, degree: usize) -> Self {
        let coeffs = (0..=degree)
            .map(|j| {
                if (1..=max_block).contains(&j) {
                    BigUint::one()
                } else {
                    BigUint::zero()
                }
            })
            .collect();
        Self { coeffs }
    }

    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Labeled coefficient `n! [x^n]`, zero past the truncation degree.
    pub fn coeff(&self, n: usize) -> BigUint {
        self.coeffs.get(n).cloned().unwrap_or_default()
    }

    /// EGF product truncated to the smaller degree of the two factors.
    ///
    /// `binomials` must cover that degree.
    pub fn mul(&self, other: &Self, binomials: &BinomialTable) -> Self {
        let degree = self.degree().min(other.degree());
        let coeffs = (0..=degree)
            .map(|n| {
                let row = binomials.row(n);
                let mut sum = BigUint::zero();
                for i in 0..=n {
                    let (a, b) = (&self.coeffs[i], &other.coeffs[n - i]);
                    if a.is_zero() || b.is_zero() {
                        continue;
                    }
                    sum += &row[i] * a * b;
                }
                sum
            })
            .collect();
        Self { coeffs }
    }

    /// `[self^0, self^1, ..., self^max_power]`, each truncated to this degree.
    pub fn powers(&self, max_power: usize, binomials: &BinomialTable) -> Vec<Self> {
        let mut powers = Vec::with_capacity(max_power + 1);
        powers.push(Self::one(self.degree()));
        for p in 1..=max_power {
            let next = powers[p - 1].mul(self, binomials);
            powers.push(next);
        }
        powers
    }
}
