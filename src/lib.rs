//! Bijective ranking of combinations, permutations, set partitions and
//! fixed-length sequences, with sequences ordered by how many distinct
//! symbols they use.

pub mod combinatorics;
pub mod entropy;
pub mod error;
pub mod order_stats;
pub mod permutation;
pub mod power_series;
pub mod rgf;
pub mod sections;
pub mod sequence;
pub mod shape;
pub mod table_file;

pub use combinatorics::{binomial, comb_rank, comb_unrank, factorial, stirling2};
pub use error::{RankError, Result};
pub use permutation::{perm_rank, perm_unrank};
pub use rgf::{RgfCounter, RgfRows, RgfTable, rgf_rank, rgf_rank_with, rgf_unrank, rgf_unrank_with};
pub use sections::{locate_section, section_count, sections_before, total_sequences};
pub use sequence::{PartitionOrder, RgfStrategy, SequenceCodec, sequence_rank, sequence_unrank};
pub use shape::{ShapeCodec, shape_rank, shape_unrank};
