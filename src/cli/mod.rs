mod table;
mod verify;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use itertools::Itertools;
use num_bigint::BigUint;
use serde_json::json;

use entrank::entropy::{information_content, positional_rank};
use entrank::{PartitionOrder, RgfStrategy, SequenceCodec};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank a sequence of symbols.
    Rank {
        #[command(flatten)]
        codec: CodecArgs,
        /// Print the rank with entropy statistics as JSON.
        #[arg(long)]
        json: bool,
        /// Symbols of the sequence, each below the alphabet size.
        values: Vec<usize>,
    },
    /// Recover the sequence with a given rank.
    Unrank {
        /// Sequence length.
        #[arg(long, short)]
        len: usize,
        #[command(flatten)]
        codec: CodecArgs,
        /// Print the sequence as JSON.
        #[arg(long)]
        json: bool,
        /// Decimal rank.
        rank: String,
    },
    /// Build the RGF completion table and write it to a cache file.
    Table {
        /// RGF length.
        #[arg(long, short)]
        len: usize,
        /// Number of blocks.
        #[arg(long, short)]
        blocks: usize,
        /// Output path.
        #[arg(long, short)]
        out: PathBuf,
    },
    /// Print a cached RGF completion table.
    ShowTable {
        path: PathBuf,
    },
    /// Check that rank and unrank are inverse for a sequence shape.
    Verify {
        /// Sequence length.
        #[arg(long, short)]
        len: usize,
        #[command(flatten)]
        codec: CodecArgs,
        /// Random sequences to check when exhaustive checking is too large.
        #[arg(long, default_value_t = 1000)]
        samples: u64,
        /// Seed for the random sequences.
        #[arg(long)]
        seed: Option<u64>,
        /// Check every rank when there are at most this many sequences.
        #[arg(long, env = "ENTRANK_EXHAUSTIVE_LIMIT", default_value_t = 1_000_000)]
        exhaustive_limit: u64,
    },
}

#[derive(Args)]
struct CodecArgs {
    /// Alphabet size; symbols are `0..alphabet`.
    #[arg(long, short)]
    alphabet: usize,
    /// Set partition order inside each symbol-count section.
    #[arg(long, value_enum, env = "ENTRANK_ORDER", default_value_t = Order::Growth)]
    order: Order,
    /// Completion counter for growth order.
    #[arg(long, value_enum, default_value_t = Strategy::Rows)]
    strategy: Strategy,
}

impl CodecArgs {
    fn codec(&self, len: usize) -> SequenceCodec {
        SequenceCodec::new(len, self.alphabet)
            .with_order(self.order.into())
            .with_strategy(self.strategy.into())
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Order {
    Growth,
    Shape,
}

impl From<Order> for PartitionOrder {
    fn from(order: Order) -> Self {
        match order {
            Order::Growth => PartitionOrder::Growth,
            Order::Shape => PartitionOrder::Shape,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Strategy {
    Table,
    Rows,
}

impl From<Strategy> for RgfStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Table => RgfStrategy::Table,
            Strategy::Rows => RgfStrategy::Rows,
        }
    }
}

/// Parse CLI arguments and execute the requested command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Rank {
            codec,
            json,
            values,
        } => {
            run_rank(codec.codec(values.len()), json, &values)?;
        }
        Commands::Unrank {
            len,
            codec,
            json,
            rank,
        } => {
            let rank: BigUint = rank
                .parse()
                .with_context(|| format!("invalid rank: {rank}"))?;
            run_unrank(codec.codec(len), json, &rank)?;
        }
        Commands::Table { len, blocks, out } => {
            table::run_table(len, blocks, &out)?;
        }
        Commands::ShowTable { path } => {
            table::run_show_table(&path)?;
        }
        Commands::Verify {
            len,
            codec,
            samples,
            seed,
            exhaustive_limit,
        } => {
            verify::run_verify(codec.codec(len), samples, seed, exhaustive_limit)?;
        }
    }

    Ok(())
}

fn run_rank(codec: SequenceCodec, json: bool, values: &[usize]) -> Result<()> {
    let rank = codec
        .rank(values)
        .with_context(|| format!("cannot rank {values:?}"))?;

    if json {
        // Only symbols that occur; the alphabet itself may be huge.
        let counts: Vec<usize> = values.iter().counts().into_values().collect();
        let output = json!({
            "rank": rank.to_string(),
            "rank_bits": rank.bits(),
            "total": codec.total().to_string(),
            "symbols": counts.len(),
            "information_bits": information_content(&counts),
            "positional_rank": positional_rank(values, codec.alphabet())?.to_string(),
        });
        println!("{output}");
    } else {
        println!("{rank}");
    }
    Ok(())
}

fn run_unrank(codec: SequenceCodec, json: bool, rank: &BigUint) -> Result<()> {
    let seq = codec
        .unrank(rank)
        .with_context(|| format!("cannot unrank {rank}"))?;

    if json {
        let output = json!({
            "rank": rank.to_string(),
            "sequence": seq,
        });
        println!("{output}");
    } else {
        let text: Vec<String> = seq.iter().map(ToString::to_string).collect();
        println!("{}", text.join(" "));
    }
    Ok(())
}
