#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use gutter_life::{Game, Generation, TransitionConfig, TransitionStrategy};
use std::env;
use std::time::Instant;

#[derive(Clone, Debug)]
struct BenchConfig {
    size: usize,
    density: f64,
    warmup: u64,
    iters: u64,
    seed: u64,
    threads: Option<usize>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            size: 1024,
            density: 0.42,
            warmup: 3,
            iters: 50,
            seed: 0x5EED_1234_ABCD_EF01,
            threads: None,
        }
    }
}

fn parse_args() -> BenchConfig {
    let mut cfg = BenchConfig::default();
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--size" => {
                if let Some(v) = args.next() {
                    cfg.size = v.parse().expect("--size expects usize");
                }
            }
            "--density" => {
                if let Some(v) = args.next() {
                    cfg.density = v.parse().expect("--density expects f64");
                }
            }
            "--warmup" => {
                if let Some(v) = args.next() {
                    cfg.warmup = v.parse().expect("--warmup expects u64");
                }
            }
            "--iters" => {
                if let Some(v) = args.next() {
                    cfg.iters = v.parse().expect("--iters expects u64");
                }
            }
            "--seed" => {
                if let Some(v) = args.next() {
                    cfg.seed = if let Some(hex) = v.strip_prefix("0x") {
                        u64::from_str_radix(hex, 16).expect("--seed hex parse failed")
                    } else {
                        v.parse().expect("--seed expects u64")
                    };
                }
            }
            "--threads" => {
                if let Some(v) = args.next() {
                    cfg.threads = Some(v.parse().expect("--threads expects usize"));
                }
            }
            other => panic!("unknown arg: {other}"),
        }
    }
    cfg
}

fn bench(cfg: &BenchConfig, initial: &Generation, strategy: TransitionStrategy) -> (f64, u64) {
    let mut config = TransitionConfig::default().strategy(strategy);
    if let Some(n) = cfg.threads {
        config = config.thread_count(n);
    }
    let mut game = Game::with_config(initial.clone(), config);
    game.step_n(cfg.warmup);

    let start = Instant::now();
    game.step_n(cfg.iters);
    let total_ms = start.elapsed().as_secs_f64() * 1000.0;
    (total_ms, game.population())
}

fn main() {
    let cfg = parse_args();
    let initial = Generation::random_seeded(cfg.size, cfg.size, cfg.density, cfg.seed);

    let (seq_ms, seq_pop) = bench(&cfg, &initial, TransitionStrategy::Sequential);
    let (par_ms, par_pop) = bench(&cfg, &initial, TransitionStrategy::Parallel);
    let match_status = if seq_pop == par_pop { "MATCH" } else { "MISMATCH" };

    println!(
        "{:<12} {:>12} {:>12} {:>12}",
        "Strategy", "Total(ms)", "Avg(ms)", "Population"
    );
    println!("{}", "-".repeat(51));
    for (name, total_ms, pop) in [("sequential", seq_ms, seq_pop), ("parallel", par_ms, par_pop)] {
        println!(
            "{:<12} {:>12.1} {:>12.4} {:>12}",
            name,
            total_ms,
            total_ms / cfg.iters.max(1) as f64,
            pop
        );
    }
    println!(
        "\n{}x{} grid, {} iters: speedup {:.2}x [{match_status}]",
        cfg.size,
        cfg.size,
        cfg.iters,
        seq_ms / par_ms
    );
}
