use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rangesplit::scheduler::default_parallelism;
use rangesplit::{
    Executor, NumericProgression, ParRange, RangeSplitter, SchedulerConfig, Splitter,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rangesplit", about = "Inspect and run splittable parallel ranges")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Bounds shared by every subcommand.
#[derive(Args, Debug)]
struct RangeArgs {
    /// First element.
    #[arg(allow_negative_numbers = true)]
    start: i64,
    /// End bound.
    #[arg(allow_negative_numbers = true)]
    end: i64,
    /// Distance between elements.
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    step: i64,
    /// Include `end` when it is reachable.
    #[arg(long)]
    inclusive: bool,
}

impl RangeArgs {
    fn progression(&self) -> Result<NumericProgression<i64>> {
        NumericProgression::new(self.start, self.end, self.step, self.inclusive)
            .with_context(|| format!("invalid range {} to {} by {}", self.start, self.end, self.step))
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the recursive halving of a range.
    Plan {
        #[command(flatten)]
        range: RangeArgs,
        /// Number of split levels to print.
        #[arg(long, default_value_t = 3)]
        depth: usize,
    },
    /// Cut a range into pieces of explicit sizes.
    Psplit {
        #[command(flatten)]
        range: RangeArgs,
        /// Comma-separated piece sizes.
        #[arg(long, value_delimiter = ',', required = true)]
        sizes: Vec<usize>,
    },
    /// Sum a range in parallel.
    Sum {
        #[command(flatten)]
        range: RangeArgs,
        /// Worker threads (default: available parallelism).
        #[arg(long)]
        threads: Option<usize>,
        /// Maximum leaf size (default: derived from length and threads).
        #[arg(long)]
        threshold: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Plan { range, depth } => run_plan(&range, depth)?,
        Commands::Psplit { range, sizes } => run_psplit(&range, &sizes)?,
        Commands::Sum {
            range,
            threads,
            threshold,
        } => run_sum(&range, threads, threshold)?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_plan(range: &RangeArgs, depth: usize) -> Result<()> {
    let splitter = RangeSplitter::new(range.progression()?);
    print_plan(&splitter, 0, depth);
    Ok(())
}

fn print_plan(splitter: &RangeSplitter<i64>, level: usize, max_depth: usize) {
    println!(
        "{:indent$}{}\t({} elements)",
        "",
        splitter.remaining_progression(),
        splitter.remaining(),
        indent = level * 2
    );
    if level >= max_depth {
        return;
    }
    let children = splitter.split();
    if children.len() < 2 {
        return;
    }
    for child in &children {
        print_plan(child, level + 1, max_depth);
    }
}

fn run_psplit(range: &RangeArgs, sizes: &[usize]) -> Result<()> {
    let splitter = RangeSplitter::new(range.progression()?);
    let requested: usize = sizes.iter().sum();
    if requested > splitter.remaining() {
        info!(
            requested,
            available = splitter.remaining(),
            "sizes exceed range, later pieces are truncated"
        );
    }
    for (idx, (piece, size)) in splitter.psplit(sizes).iter().zip(sizes).enumerate() {
        println!(
            "piece {}\trequested={}\tgot={}\t{}",
            idx + 1,
            size,
            piece.remaining(),
            piece.remaining_progression()
        );
    }
    Ok(())
}

fn run_sum(range: &RangeArgs, threads: Option<usize>, threshold: Option<usize>) -> Result<()> {
    let range = ParRange::from_progression(range.progression()?);
    let threads = threads.unwrap_or_else(default_parallelism);
    let config = match threshold {
        Some(threshold) => SchedulerConfig::with_threshold(threshold)?.with_parallelism(threads)?,
        None => SchedulerConfig::for_len(range.len(), threads)?,
    };
    let executor =
        Executor::parallel(threads, config).context("failed to start worker pool")?;

    let report = range
        .fold_report(
            &executor,
            || 0i128,
            |acc, x| acc + i128::from(x),
            |a, b| a + b,
        )
        .context("parallel sum failed")?;

    println!(
        "sum={}\telements={}\tthreads={}\tthreshold={}\tleaves={}\tdepth={}",
        report.output,
        range.len(),
        threads,
        executor.config().threshold,
        report.leaves,
        report.max_depth
    );
    Ok(())
}
