use std::str::FromStr;

use rover_grid::config::{RoverSpec, SimConfig};
use rover_grid::error::SimError;
use rover_grid::logging;
use rover_grid::runner::{self, BenchOptions};

fn parse_list<T: FromStr>(arg: &str) -> Option<Vec<T>> {
    if arg == "-" {
        return None;
    }
    let mut values = Vec::new();
    for part in arg.split(',') {
        if part.trim().is_empty() {
            return None;
        }
        let value = part.trim().parse::<T>().ok()?;
        values.push(value);
    }
    Some(values)
}

fn parse_seed(arg: &str) -> Option<u64> {
    arg.strip_prefix("seed=")?.parse().ok()
}

fn print_usage(program: &str) {
    println!("Rover Grid CLI");
    println!("Usage:");
    println!("  {program} (run demo mission)");
    println!("  {program} run <width> <height> <obstacles> [seed=<n>] <name:heading:commands>...");
    println!("  {program} bench [width] [height] [obstacles] [rovers] [commands_len] [runs] [seed=<n>]");
    println!("  {program} stress [size_sets] [rover_sets] [command_len_sets]");
    println!("  {program} --help");
    println!();
    println!("Headings are N, E, S, W. Commands are l (left), r (right), f (forward), b (backward).");
    println!("Sets are comma-separated lists (e.g., 5,10,20). Use \"-\" to keep defaults.");
    println!("Defaults:");
    println!("  bench  width=20 height=20 obstacles=10% rovers=4 commands_len=50 runs=200");
    println!("  stress sizes=5,10,20,40 rovers=1,2,4,8 commands_len=10,50");
    println!("Environment:");
    println!("  {}=<level>  log level (off, error, warn, info, debug, trace)", logging::LOG_ENV);
}

fn exit_with_usage(program: &str, message: &str) -> ! {
    eprintln!("{message}");
    print_usage(program);
    std::process::exit(2);
}

fn parse_run_args(program: &str, mut args: impl Iterator<Item = String>) -> SimConfig {
    let mut next_arg = |label: &str| -> String {
        args.next()
            .unwrap_or_else(|| exit_with_usage(program, &format!("run: missing {label}")))
    };
    let width = next_arg("width");
    let width = width
        .parse::<i32>()
        .unwrap_or_else(|_| exit_with_usage(program, &format!("run: invalid width value: {width}")));
    let height = next_arg("height");
    let height = height
        .parse::<i32>()
        .unwrap_or_else(|_| exit_with_usage(program, &format!("run: invalid height value: {height}")));
    let obstacles = next_arg("obstacles");
    let obstacles = obstacles.parse::<usize>().unwrap_or_else(|_| {
        exit_with_usage(program, &format!("run: invalid obstacles value: {obstacles}"))
    });

    let mut seed = None;
    let mut rovers = Vec::new();
    for arg in args {
        if arg.starts_with("seed=") {
            match parse_seed(&arg) {
                Some(value) => seed = Some(value),
                None => exit_with_usage(program, &format!("run: invalid seed value: {arg}")),
            }
            continue;
        }
        match RoverSpec::parse(&arg) {
            Some(spec) => rovers.push(spec),
            None => exit_with_usage(program, &format!("run: invalid rover definition: {arg}")),
        }
    }

    SimConfig {
        width,
        height,
        obstacles,
        seed,
        rovers,
    }
}

fn parse_bench_args(args: impl Iterator<Item = String>) -> BenchOptions {
    let mut options = BenchOptions::default();
    let mut positional = Vec::new();
    for arg in args {
        match parse_seed(&arg) {
            Some(seed) => options.seed = Some(seed),
            None => positional.push(arg),
        }
    }
    let mut positional = positional.into_iter();
    options.width = positional.next().and_then(|v| v.parse().ok());
    options.height = positional.next().and_then(|v| v.parse().ok());
    options.obstacles = positional.next().and_then(|v| v.parse().ok());
    options.rovers = positional.next().and_then(|v| v.parse().ok());
    options.commands_len = positional.next().and_then(|v| v.parse().ok());
    options.runs = positional.next().and_then(|v| v.parse().ok());
    options
}

fn parse_stress_arg<T: FromStr>(program: &str, label: &str, arg: Option<String>) -> Option<Vec<T>> {
    let arg = arg?;
    if arg == "-" {
        return None;
    }
    match parse_list(&arg) {
        Some(values) => Some(values),
        None => exit_with_usage(program, &format!("stress: invalid {label} value: {arg}")),
    }
}

fn exit_on_error(context: &str, result: Result<(), SimError>) {
    if let Err(err) = result {
        eprintln!("{context} error: {err}");
        std::process::exit(1);
    }
}

fn main() {
    logging::init();
    let program = std::env::args()
        .next()
        .unwrap_or_else(|| "rover_grid".to_string());
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("run") => {
            let config = parse_run_args(&program, args);
            exit_on_error("mission", runner::run_mission(&config));
        }
        Some("bench") => {
            logging::quiet();
            let options = parse_bench_args(args);
            exit_on_error("benchmark", runner::run_benchmark(options));
        }
        Some("stress") => {
            logging::quiet();
            let sizes = parse_stress_arg(&program, "size_sets", args.next());
            let rovers = parse_stress_arg(&program, "rover_sets", args.next());
            let lengths = parse_stress_arg(&program, "command_len_sets", args.next());
            if let Some(extra) = args.next() {
                exit_with_usage(&program, &format!("stress: unexpected argument: {extra}"));
            }
            exit_on_error("stress", runner::run_stress(sizes, rovers, lengths));
        }
        Some("--help") | Some("-h") | Some("help") => print_usage(&program),
        Some(other) => {
            exit_with_usage(&program, &format!("unknown command: {other}"));
        }
        None => exit_on_error("demo", runner::run_demo()),
    }
}
