//! Shape-ordered ranking of set partitions.
//!
//! Plain RGF order interleaves partitions of very different shapes. Here the
//! partitions of `n` elements into `k` blocks are ordered block by block,
//! always looking at the block that holds the smallest element not yet
//! placed:
//!
//! 1. by the size `m` of the largest remaining block, larger first;
//! 2. by the size `r` of the initial block, larger first;
//! 3. by which other `r - 1` elements share the initial block, as a
//!    combination of their indices among the remaining elements;
//! 4. by the order of the rest, recursively.
//!
//! After the initial block is removed, the rest is a partition into `k - 1`
//! blocks whose blocks are all at most `m`, and if `r < m` one of them must
//! reach `m`. The counts for these classes come from powers of the truncated
//! generating function `sum_{j <= m} x^j / j!` (see [`crate::power_series`]).
//!
//! The number of partitions in each class is still `S2(n, k)`, so a shape rank
//! can replace an RGF rank anywhere.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::Zero;
use tracing::trace;

use crate::combinatorics::{BinomialTable, comb_rank, comb_unrank, factorial};
use crate::error::{RankError, Result, check_rank};
use crate::order_stats::IndexedSet;
use crate::power_series::LabeledSeries;
use crate::rgf::validate_rgf;

/// Counts of set partitions with bounded block sizes, for up to `degree`
/// elements and `max_blocks` blocks.
///
/// Series powers are computed on first use for each block-size bound and kept
/// for the lifetime of the value.
#[derive(Clone, Debug)]
pub struct BoundedStirling {
    degree: usize,
    max_blocks: usize,
    binomials: BinomialTable,
    factorials: Vec<BigUint>,
    // powers[cap][k] = (sum_{j=1..=cap} x^j / j!)^k, labeled.
    powers: Vec<Option<Vec<LabeledSeries>>>,
}

impl BoundedStirling {
    pub fn new(degree: usize, max_blocks: usize) -> Self {
        Self {
            degree,
            max_blocks,
            binomials: BinomialTable::new(degree),
            factorials: (0..=max_blocks).map(factorial).collect(),
            powers: vec![None; degree + 1],
        }
    }

    pub fn binomials(&self) -> &BinomialTable {
        &self.binomials
    }

    /// Partitions of `n` elements into `k` blocks, every block at most `cap`.
    pub fn at_most(&mut self, n: usize, k: usize, cap: usize) -> BigUint {
        assert!(n <= self.degree && k <= self.max_blocks);
        let cap = cap.min(self.degree);
        let (degree, max_blocks) = (self.degree, self.max_blocks);
        let binomials = &self.binomials;
        let powers = self.powers[cap].get_or_insert_with(|| {
            LabeledSeries::block_sizes(cap, degree).powers(max_blocks, binomials)
        });
        // Blocks are unlabeled: divide out the k! orderings.
        let (count, remainder) = powers[k].coeff(n).div_rem(&self.factorials[k]);
        assert!(
            remainder.is_zero(),
            "labeled coefficient must be divisible by k! (n = {n}, k = {k}, cap = {cap})"
        );
        count
    }

    /// Partitions of `n` elements into `k` blocks whose largest block is
    /// exactly `m`.
    pub fn exact_max(&mut self, n: usize, k: usize, m: usize) -> BigUint {
        let upto = self.at_most(n, k, m);
        if m == 0 {
            return upto;
        }
        upto - self.at_most(n, k, m - 1)
    }
}

/// Partitions of `n` remaining elements into `k` blocks, all at most `cap`,
/// with at least one block of exactly `cap` when `exact`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ShapeClass {
    n: usize,
    k: usize,
    cap: usize,
    exact: bool,
}

impl ShapeClass {
    fn size(&self, counts: &mut BoundedStirling) -> BigUint {
        if self.exact {
            counts.exact_max(self.n, self.k, self.cap)
        } else {
            counts.at_most(self.n, self.k, self.cap)
        }
    }

    /// Class left after removing an initial block of size `r` from a
    /// partition whose largest block is `m`.
    fn rest(&self, m: usize, r: usize) -> Self {
        Self {
            n: self.n - r,
            k: self.k - 1,
            cap: m,
            exact: r < m,
        }
    }

    /// Ranks skipped by every partition whose largest block exceeds `m`.
    fn largest_offset(&self, counts: &mut BoundedStirling, m: usize) -> BigUint {
        counts.at_most(self.n, self.k, self.cap) - counts.at_most(self.n, self.k, m)
    }

    /// Partitions with largest block `m` and an initial block of size `r`.
    fn with_initial(&self, counts: &mut BoundedStirling, m: usize, r: usize) -> BigUint {
        let rest = self.rest(m, r).size(counts);
        counts.binomials().get(self.n - 1, r - 1) * rest
    }
}

/// Shape-ordered codec for partitions of `positions` elements into exactly
/// `blocks` blocks. Partitions go in and out as canonical RGFs.
#[derive(Clone, Debug)]
pub struct ShapeCodec {
    positions: usize,
    blocks: usize,
    counts: BoundedStirling,
}

impl ShapeCodec {
    pub fn new(positions: usize, blocks: usize) -> Self {
        Self {
            positions,
            blocks,
            counts: BoundedStirling::new(positions, blocks),
        }
    }

    fn top_class(&self) -> ShapeClass {
        ShapeClass {
            n: self.positions,
            k: self.blocks,
            cap: self.positions,
            exact: false,
        }
    }

    /// Number of partitions ranked by this codec, `S2(positions, blocks)`.
    pub fn total(&mut self) -> BigUint {
        if self.blocks > self.positions {
            return BigUint::zero();
        }
        self.top_class().size(&mut self.counts)
    }

    pub fn rank(&mut self, rgf: &[usize]) -> Result<BigUint> {
        if rgf.len() != self.positions {
            return Err(RankError::LengthMismatch {
                expected: self.positions,
                actual: rgf.len(),
            });
        }
        validate_rgf(rgf, self.blocks)?;

        // Canonical RGF ids already list blocks by their smallest element.
        let mut members = vec![Vec::new(); self.blocks];
        for (element, &block) in rgf.iter().enumerate() {
            members[block - 1].push(element);
        }
        let mut largest_from = vec![0; self.blocks + 1];
        for p in (0..self.blocks).rev() {
            largest_from[p] = largest_from[p + 1].max(members[p].len());
        }

        let mut class = self.top_class();
        let counts = &mut self.counts;
        let mut remaining = IndexedSet::full(self.positions);
        let mut rank = BigUint::zero();
        for (p, block) in members.iter().enumerate() {
            let m = largest_from[p];
            let r = block.len();

            let mut offset = class.largest_offset(counts, m);
            for larger in r + 1..=m {
                offset += class.with_initial(counts, m, larger);
            }

            remaining.remove(block[0]);
            let indices: Vec<usize> = block[1..].iter().map(|&e| remaining.rank(e)).collect();
            for &element in &block[1..] {
                remaining.remove(element);
            }
            let element_rank = comb_rank(&indices)?;
            let rest = class.rest(m, r);
            let rest_size = rest.size(counts);

            trace!(block = p, largest = m, initial = r, %element_rank, %offset, "shape block");
            rank += offset + element_rank * rest_size;
            class = rest;
        }
        Ok(rank)
    }

    pub fn unrank(&mut self, rank: &BigUint) -> Result<Vec<usize>> {
        check_rank(rank, &self.total())?;

        let mut class = self.top_class();
        let counts = &mut self.counts;
        let mut rgf = vec![0; self.positions];
        let mut remaining = IndexedSet::full(self.positions);
        let mut rank = rank.clone();
        for block_id in 1..=self.blocks {
            // Smallest m whose skipped prefix still fits under the rank.
            let (mut lo, mut hi) = (1, class.cap);
            while lo < hi {
                let mid = lo + (hi - lo) / 2;
                if class.largest_offset(counts, mid) <= rank {
                    hi = mid;
                } else {
                    lo = mid + 1;
                }
            }
            let m = lo;
            rank -= class.largest_offset(counts, m);

            let mut r = m;
            loop {
                let count = class.with_initial(counts, m, r);
                if rank < count || r == 1 {
                    break;
                }
                rank -= count;
                r -= 1;
            }

            let rest = class.rest(m, r);
            let (element_rank, within_rest) = rank.div_rem(&rest.size(counts));
            rank = within_rest;
            let indices = comb_unrank(&element_rank, class.n - 1, r - 1)?;

            let Some(first) = remaining.first() else {
                unreachable!("an in-range rank never runs out of elements");
            };
            remaining.remove(first);
            let elements: Vec<usize> = indices
                .iter()
                .map(|&index| {
                    remaining
                        .select(index)
                        .expect("combination indices are below the remaining count")
                })
                .collect();
            rgf[first] = block_id;
            for &element in &elements {
                rgf[element] = block_id;
                remaining.remove(element);
            }
            trace!(block = block_id, largest = m, initial = r, %element_rank, "shape block");
            class = rest;
        }
        debug_assert!(remaining.is_empty());
        Ok(rgf)
    }
}

/// Shape rank of `rgf` among partitions with exactly `blocks` blocks.
pub fn shape_rank(rgf: &[usize], blocks: usize) -> Result<BigUint> {
    ShapeCodec::new(rgf.len(), blocks).rank(rgf)
}

/// The canonical RGF with the given shape rank.
pub fn shape_unrank(rank: &BigUint, positions: usize, blocks: usize) -> Result<Vec<usize>> {
    ShapeCodec::new(positions, blocks).unrank(rank)
}
