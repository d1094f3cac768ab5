//! Mission, benchmark, and stress-test runners for the rover CLI.

use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::SimConfig;
use crate::error::SimError;
use crate::grid;
use crate::render;
use crate::rover::Heading;
use crate::scheduler::{Command, CommandRequest};
use crate::simulation::Simulation;

// Benchmark defaults (roughly 10% obstacle density).
const BENCH_SIZE: i32 = 20;
const BENCH_ROVERS: usize = 4;
const BENCH_COMMANDS_LEN: usize = 50;
const BENCH_RUNS: usize = 200;
// Each stress configuration repeats this many random missions.
const STRESS_RUNS: usize = 20;

const CSV_HEADER: &str = "width,height,obstacles,rovers,commands_len,runs,seed,total_orders,elapsed_ms,throughput_orders_per_s,accepted_moves,rejected_moves,cpu_user_s,cpu_sys_s,invariant_violation";

const COMMAND_ALPHABET: [Command; 4] = [
    Command::TurnLeft,
    Command::TurnRight,
    Command::Forward,
    Command::Backward,
];

/// Best-effort CPU user/system time snapshot (seconds) on Unix platforms.
#[cfg(unix)]
fn cpu_times_seconds() -> Option<(f64, f64)> {
    // SAFETY: `rusage` is plain old data and getrusage only writes into it.
    let mut usage: libc::rusage = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::getrusage(libc::RUSAGE_SELF, &mut usage) };
    if rc != 0 {
        return None;
    }
    let seconds = |tv: libc::timeval| tv.tv_sec as f64 + (tv.tv_usec as f64 / 1_000_000.0);
    Some((seconds(usage.ru_utime), seconds(usage.ru_stime)))
}

/// Stub on non-Unix platforms.
#[cfg(not(unix))]
fn cpu_times_seconds() -> Option<(f64, f64)> {
    None
}

fn default_obstacles(width: i32, height: i32) -> usize {
    (width as usize).saturating_mul(height as usize) / 10
}

fn random_commands<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| COMMAND_ALPHABET[rng.gen_range(0..COMMAND_ALPHABET.len())].as_char())
        .collect()
}

/// Set up and run one mission, printing maps, travel logs, and a summary.
pub fn run_mission(config: &SimConfig) -> Result<(), SimError> {
    config.validate()?;
    let (seed, mut rng) = config.rng();
    log::info!("[MISSION] placement seed={seed}");
    let mut sim = Simulation::setup(
        config.width,
        config.height,
        config.obstacles,
        &config.roster(),
        &mut rng,
    )?;

    println!("INITIAL MAP");
    print!("{}", render::paint(sim.grid(), sim.rovers()));

    let report = match sim.run(&config.requests()) {
        Ok(report) => report,
        Err(err) => {
            for warning in sim.warnings() {
                eprintln!("{}", render::warning_line(warning));
            }
            return Err(err);
        }
    };

    println!("FINAL MAP");
    print!("{}", render::paint(sim.grid(), sim.rovers()));
    println!("TRAVEL LOGS");
    for log in &report.travel_logs {
        println!("{}", render::travel_log_line(log));
    }
    for warning in sim.warnings() {
        println!("{}", render::warning_line(warning));
    }

    let finals: Vec<String> = sim
        .rovers()
        .iter()
        .map(|rover| format!("{}{}{}", rover.name(), rover.position(), rover.heading()))
        .collect();
    println!("MISSION SUMMARY");
    println!("seed={seed}");
    println!(
        "map={}x{} obstacles={} rovers={}",
        sim.grid().width(),
        sim.grid().height(),
        config.obstacles,
        config.rovers.len()
    );
    println!("executed_orders={}", report.executed_orders);
    println!("accepted_moves={}", report.accepted_moves);
    println!("rejected_moves={}", report.rejected_moves);
    println!("warnings={}", sim.warnings().len());
    println!("invariant_violation={}", !sim.check_invariants());
    println!("final_positions={}", finals.join(" "));
    Ok(())
}

/// Run the built-in demo mission.
pub fn run_demo() -> Result<(), SimError> {
    log::debug!("[DEMO] start");
    run_mission(&SimConfig::default())
}

/// Aggregated metrics from one benchmark configuration.
struct BenchResult {
    width: i32,
    height: i32,
    obstacles: usize,
    rovers: usize,
    commands_len: usize,
    runs: usize,
    seed: u64,
    total_orders: usize,
    elapsed_ms: f64,
    throughput: f64,
    accepted_moves: usize,
    rejected_moves: usize,
    cpu_user_s: Option<f64>,
    cpu_sys_s: Option<f64>,
    invariant_violation: bool,
}

impl BenchResult {
    fn csv_row(&self) -> String {
        let cpu = |value: Option<f64>| {
            value
                .map(|v| format!("{v:.4}"))
                .unwrap_or_else(|| "NA".to_string())
        };
        format!(
            "{},{},{},{},{},{},{},{},{:.2},{:.2},{},{},{},{},{}",
            self.width,
            self.height,
            self.obstacles,
            self.rovers,
            self.commands_len,
            self.runs,
            self.seed,
            self.total_orders,
            self.elapsed_ms,
            self.throughput,
            self.accepted_moves,
            self.rejected_moves,
            cpu(self.cpu_user_s),
            cpu(self.cpu_sys_s),
            self.invariant_violation
        )
    }
}

/// Run `runs` random missions; run `i` uses seed `seed + i`.
fn benchmark_once(
    width: i32,
    height: i32,
    obstacles: usize,
    rovers: usize,
    commands_len: usize,
    runs: usize,
    seed: u64,
) -> Result<BenchResult, SimError> {
    let mut total_orders = 0usize;
    let mut accepted_moves = 0usize;
    let mut rejected_moves = 0usize;
    let mut invariant_violation = false;

    let cpu_start = cpu_times_seconds();
    let start = Instant::now();
    for run in 0..runs {
        let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(run as u64));
        let roster: Vec<(String, Heading)> = (0..rovers)
            .map(|i| (format!("rover-{i}"), Heading::ALL[rng.gen_range(0..4)]))
            .collect();
        let requests: Vec<CommandRequest> = roster
            .iter()
            .map(|(name, _)| CommandRequest::new(name.clone(), random_commands(&mut rng, commands_len)))
            .collect();
        let mut sim = Simulation::setup(width, height, obstacles, &roster, &mut rng)?;
        let report = sim.run(&requests)?;
        total_orders += report.executed_orders;
        accepted_moves += report.accepted_moves;
        rejected_moves += report.rejected_moves;
        if !sim.check_invariants() {
            log::error!("[BENCH] invariant violation in run {run}");
            invariant_violation = true;
        }
    }

    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    let throughput = if elapsed_ms > 0.0 {
        (total_orders as f64) / (elapsed_ms / 1000.0)
    } else {
        0.0
    };
    let (cpu_user_s, cpu_sys_s) = match (cpu_start, cpu_times_seconds()) {
        (Some((user_start, sys_start)), Some((user_end, sys_end))) => {
            (Some(user_end - user_start), Some(sys_end - sys_start))
        }
        _ => (None, None),
    };

    Ok(BenchResult {
        width,
        height,
        obstacles,
        rovers,
        commands_len,
        runs,
        seed,
        total_orders,
        elapsed_ms,
        throughput,
        accepted_moves,
        rejected_moves,
        cpu_user_s,
        cpu_sys_s,
        invariant_violation,
    })
}

/// Parameters for a single benchmark; `None` keeps the default.
#[derive(Clone, Debug, Default)]
pub struct BenchOptions {
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub obstacles: Option<usize>,
    pub rovers: Option<usize>,
    pub commands_len: Option<usize>,
    pub runs: Option<usize>,
    pub seed: Option<u64>,
}

/// Run a single benchmark and print one CSV row.
pub fn run_benchmark(options: BenchOptions) -> Result<(), SimError> {
    let width = options.width.unwrap_or(BENCH_SIZE);
    let height = options.height.unwrap_or(BENCH_SIZE);
    let obstacles = options
        .obstacles
        .unwrap_or_else(|| default_obstacles(width.max(0), height.max(0)));
    let rovers = options.rovers.unwrap_or(BENCH_ROVERS);
    let commands_len = options.commands_len.unwrap_or(BENCH_COMMANDS_LEN);
    let runs = options.runs.unwrap_or(BENCH_RUNS);
    let seed = options.seed.unwrap_or_else(rand::random);

    let result = benchmark_once(width, height, obstacles, rovers, commands_len, runs, seed)?;
    println!("{CSV_HEADER}");
    println!("{}", result.csv_row());
    if result.invariant_violation {
        eprintln!("# violation,grid_invariant");
    }
    Ok(())
}

/// Sweep square map sizes, rover counts, and command lengths.
pub fn run_stress(
    size_sets: Option<Vec<i32>>,
    rover_sets: Option<Vec<usize>>,
    command_len_sets: Option<Vec<usize>>,
) -> Result<(), SimError> {
    let size_sets = size_sets.unwrap_or_else(|| vec![5, 10, 20, 40]);
    let rover_sets = rover_sets.unwrap_or_else(|| vec![1, 2, 4, 8]);
    let command_len_sets = command_len_sets.unwrap_or_else(|| vec![10, 50]);
    let sizes = size_sets
        .into_iter()
        .map(|size| grid::cell_count(size, size).map(|capacity| (size, capacity)))
        .collect::<Result<Vec<_>, _>>()?;
    let seed: u64 = rand::random();

    println!("{CSV_HEADER}");
    for (size, capacity) in sizes {
        let obstacles = capacity / 10;
        for rovers in rover_sets.iter().copied() {
            if obstacles.checked_add(rovers).is_none_or(|needed| needed > capacity) {
                eprintln!("stress warning: skipped size={size} rovers={rovers} (map too small)");
                continue;
            }
            for commands_len in command_len_sets.iter().copied() {
                let result = benchmark_once(
                    size,
                    size,
                    obstacles,
                    rovers,
                    commands_len,
                    STRESS_RUNS,
                    seed,
                )?;
                println!("{}", result.csv_row());
                if result.invariant_violation {
                    eprintln!("# violation,grid_invariant");
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler;

    #[test]
    fn random_commands_use_valid_alphabet() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let commands = random_commands(&mut rng, 64);
        assert_eq!(commands.len(), 64);
        assert!(scheduler::validate(&[CommandRequest::new("x", commands)]).is_empty());
    }

    #[test]
    fn benchmark_counts_every_order() {
        let result = benchmark_once(8, 8, 6, 3, 12, 5, 17).expect("benchmark");
        assert_eq!(result.total_orders, 3 * 12 * 5);
        assert!(result.accepted_moves + result.rejected_moves <= result.total_orders);
        assert!(!result.invariant_violation);
        assert_eq!(result.csv_row().split(',').count(), CSV_HEADER.split(',').count());
    }

    #[test]
    fn benchmark_surfaces_setup_errors() {
        let err = benchmark_once(2, 2, 4, 1, 1, 1, 0).err();
        assert!(matches!(err, Some(SimError::InsufficientSpace { .. })));
    }

    #[test]
    fn stress_rejects_oversized_maps_up_front() {
        let err = run_stress(Some(vec![4, 65_536]), Some(vec![1]), Some(vec![1])).unwrap_err();
        assert!(matches!(err, SimError::MapTooLarge { width: 65_536, .. }));
    }

    #[test]
    fn stress_skips_rover_counts_that_overflow() {
        assert_eq!(run_stress(Some(vec![3]), Some(vec![usize::MAX]), Some(vec![1])), Ok(()));
    }
}
