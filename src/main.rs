#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, anyhow, bail};
use gutter_life::{Game, Generation, TransitionConfig, TransitionStrategy};
use tracing::{Level, info};

const DEFAULT_SIDE: usize = 40;
const DEFAULT_DENSITY: f64 = 0.35;
const DEFAULT_SEED: u64 = 0x5EED_1234_ABCD_EF01;
const USAGE: &str = "usage: gutter-life [--file PATH | --random WxH] [--density P] [--seed N] \
[--steps N] [--threads N] [--max-threads N] [--strategy sequential|parallel] [--check] [--quiet] [--verbose]";

enum Source {
    File(PathBuf),
    Random { width: usize, height: usize },
}

struct MainArgs {
    source: Source,
    density: f64,
    seed: u64,
    steps: u64,
    config: TransitionConfig,
    check: bool,
    quiet: bool,
    verbose: bool,
}

fn parse_seed(value: &str) -> Result<u64> {
    let parsed = match value.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.with_context(|| format!("--seed expects a u64, got {value:?}"))
}

fn parse_dimensions(value: &str) -> Result<(usize, usize)> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| anyhow!("--random expects WxH, got {value:?}"))?;
    let width: usize = w.parse().with_context(|| format!("bad width in {value:?}"))?;
    let height: usize = h.parse().with_context(|| format!("bad height in {value:?}"))?;
    if width == 0 || height == 0 {
        bail!("--random dimensions must be non-zero");
    }
    Ok((width, height))
}

fn parse_args() -> Result<MainArgs> {
    let mut args = MainArgs {
        source: Source::Random {
            width: DEFAULT_SIDE,
            height: DEFAULT_SIDE,
        },
        density: DEFAULT_DENSITY,
        seed: DEFAULT_SEED,
        steps: 1,
        config: TransitionConfig::default(),
        check: false,
        quiet: false,
        verbose: false,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        let mut next_arg = |flag: &str| -> Result<String> {
            iter.next()
                .ok_or_else(|| anyhow!("{flag} requires a value\n{USAGE}"))
        };
        match arg.as_str() {
            "--file" => args.source = Source::File(PathBuf::from(next_arg("--file")?)),
            "--random" => {
                let (width, height) = parse_dimensions(&next_arg("--random")?)?;
                args.source = Source::Random { width, height };
            }
            "--density" => {
                args.density = next_arg("--density")?
                    .parse()
                    .context("--density expects f64")?;
            }
            "--seed" => args.seed = parse_seed(&next_arg("--seed")?)?,
            "--steps" => {
                args.steps = next_arg("--steps")?
                    .parse()
                    .context("--steps expects u64")?;
            }
            "--threads" => {
                let n: usize = next_arg("--threads")?
                    .parse()
                    .context("--threads requires a positive integer")?;
                args.config = args.config.thread_count(n);
            }
            "--max-threads" => {
                let n: usize = next_arg("--max-threads")?
                    .parse()
                    .context("--max-threads requires a positive integer")?;
                args.config = args.config.max_threads(n);
            }
            "--strategy" => {
                let strategy = match next_arg("--strategy")?.to_ascii_lowercase().as_str() {
                    "sequential" => TransitionStrategy::Sequential,
                    "parallel" => TransitionStrategy::Parallel,
                    other => bail!("unknown strategy: {other} (expected sequential or parallel)"),
                };
                args.config = args.config.strategy(strategy);
            }
            "--check" => args.check = true,
            "--quiet" => args.quiet = true,
            "--verbose" => args.verbose = true,
            other => bail!("unknown argument: {other}\n{USAGE}"),
        }
    }
    Ok(args)
}

fn initial_generation(args: &MainArgs) -> Result<Generation> {
    match &args.source {
        Source::File(path) => gutter_life::loader::import(path)
            .with_context(|| format!("failed to import {}", path.display())),
        Source::Random { width, height } => Ok(Generation::random_seeded(
            *width,
            *height,
            args.density,
            args.seed,
        )),
    }
}

/// Step a sequential oracle alongside the game and fail on the first divergence.
fn run_checked(game: &mut Game, steps: u64) -> Result<()> {
    let mut oracle = game.current().clone();
    for _ in 0..steps {
        game.advance();
        oracle = oracle.sequential_transition();
        if game.current() != &oracle {
            bail!(
                "generation {}: engine diverged from sequential reference",
                game.generation_number()
            );
        }
    }
    info!(steps, "sequential reference matched every generation");
    Ok(())
}

fn main() -> Result<()> {
    let args = parse_args()?;
    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let initial = initial_generation(&args)?;
    let mut game = Game::with_config(initial, args.config.clone());
    info!(
        width = game.current().width(),
        height = game.current().height(),
        population = game.population(),
        threads = game.threads(),
        strategy = ?game.strategy(),
        "starting"
    );

    let start = Instant::now();
    if args.check {
        run_checked(&mut game, args.steps)?;
    } else {
        game.step_n(args.steps);
    }
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    if !args.quiet {
        println!("{}", game.current());
        println!();
    }
    println!(
        "Generation {}: population = {} ({elapsed_ms:.3} ms total)",
        game.generation_number(),
        game.population()
    );
    Ok(())
}
