use anyhow::{anyhow, Result};
use clap::{arg, Command};
use sc_challenges::set_cover::{baselines::greedy, Instance, Solution, Track};
use sc_runner::{default_suite, run_test, total_score, Test};
use sc_utils::{jsonify, read_json_arg, seed_from_str};
use std::{
    fs,
    path::{Path, PathBuf},
};

fn cli() -> Command {
    Command::new("sc-runner")
        .about("Greedy weighted set cover solver and test harness")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("test_suite")
                .about("Runs a battery of instances and scores them against cost bounds")
                .arg(
                    arg!(--suite [SUITE] "Suite json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--"data-dir" [DATA_DIR] "Directory instance filenames are relative to")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("run")
                .about("Runs and scores a single instance")
                .arg(
                    arg!(<INSTANCE> "Path to instance file")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(<BOUND1> "Costs below this bound earn partial credit")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(<BOUND2> "Costs at or below this bound earn full credit")
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
        .subcommand(
            Command::new("solve")
                .about("Solves an instance and outputs the solution json")
                .arg(
                    arg!(<INSTANCE> "Path to instance file")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--output [OUTPUT] "Write the solution to this file instead of stdout")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("verify")
                .about("Verifies a solution against an instance")
                .arg(
                    arg!(<INSTANCE> "Path to instance file")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(<SOLUTION> "Solution json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--"max-cost" [MAX_COST] "Reject solutions costing more than this")
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
        .subcommand(
            Command::new("generate")
                .about("Generates a random solvable instance")
                .arg(
                    arg!(<RAND_HASH> "A string used in seed generation")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(<NUM_ELEMENTS> "Size of the universe")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(<NUM_SUBSETS> "Number of candidate subsets")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--nonce [NONCE] "Nonce value")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("0"),
                )
                .arg(
                    arg!(--output [OUTPUT] "Write the instance to this file instead of stdout")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
}

fn main() {
    pretty_env_logger::init();
    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("test_suite", sub_m)) => test_suite(
            sub_m.get_one::<String>("suite").cloned(),
            sub_m.get_one::<PathBuf>("data-dir").cloned(),
        ),
        Some(("run", sub_m)) => run(
            sub_m.get_one::<PathBuf>("INSTANCE").unwrap().clone(),
            *sub_m.get_one::<u64>("BOUND1").unwrap(),
            *sub_m.get_one::<u64>("BOUND2").unwrap(),
        ),
        Some(("solve", sub_m)) => solve(
            sub_m.get_one::<PathBuf>("INSTANCE").unwrap().clone(),
            sub_m.get_one::<PathBuf>("output").cloned(),
        ),
        Some(("verify", sub_m)) => verify(
            sub_m.get_one::<PathBuf>("INSTANCE").unwrap().clone(),
            sub_m.get_one::<String>("SOLUTION").unwrap().clone(),
            sub_m.get_one::<u64>("max-cost").cloned(),
        ),
        Some(("generate", sub_m)) => generate(
            sub_m.get_one::<String>("RAND_HASH").unwrap().clone(),
            *sub_m.get_one::<usize>("NUM_ELEMENTS").unwrap(),
            *sub_m.get_one::<usize>("NUM_SUBSETS").unwrap(),
            *sub_m.get_one::<u64>("nonce").unwrap(),
            sub_m.get_one::<PathBuf>("output").cloned(),
        ),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

pub fn test_suite(suite: Option<String>, data_dir: Option<PathBuf>) -> Result<()> {
    let tests = match suite {
        Some(suite) => read_json_arg::<Vec<Test>>(&suite)?,
        None => default_suite(),
    };
    run_tests(&tests, data_dir)
}

pub fn run(instance_path: PathBuf, bound1: u64, bound2: u64) -> Result<()> {
    let test = Test::new(&instance_path.to_string_lossy(), bound1, bound2);
    run_tests(&[test], None)
}

fn run_tests(tests: &[Test], data_dir: Option<PathBuf>) -> Result<()> {
    let mut reports = Vec::with_capacity(tests.len());
    for test in tests {
        let report = run_test(test, data_dir.as_deref());
        match &report {
            Ok(report) => println!("{}", report),
            Err(e) => {
                println!("running test {}\tfailed", test.filename);
                eprintln!("Error: {}", e);
            }
        }
        reports.push(report);
    }
    if tests.len() > 1 {
        println!("total score = {}", total_score(&reports));
    }
    if reports.iter().all(|r| r.is_err()) {
        return Err(anyhow!("No test completed"));
    }
    Ok(())
}

pub fn solve(instance_path: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let instance = load_instance(&instance_path)?;
    let cover = greedy::solve(&instance)?;
    log::info!(
        "Solved {} with cost {} in {:.6}s ({})",
        instance_path.display(),
        cover.total_cost,
        cover.elapsed.as_secs_f64(),
        cover.stats
    );
    let solution = jsonify(&cover.to_solution());
    match output {
        Some(path) => fs::write(&path, solution)
            .map_err(|e| anyhow!("Failed to write solution to {}: {}", path.display(), e))?,
        None => println!("{}", solution),
    }
    Ok(())
}

pub fn verify(instance_path: PathBuf, solution: String, max_cost: Option<u64>) -> Result<()> {
    let instance = load_instance(&instance_path)?;
    let solution = read_json_arg::<Solution>(&solution)?;
    let total_cost = instance
        .evaluate_total_cost(&solution)
        .map_err(|e| anyhow!("Invalid solution: {}", e))?;
    if let Some(max_cost) = max_cost {
        instance
            .verify_solution(&solution, max_cost)
            .map_err(|e| anyhow!("Invalid solution: {}", e))?;
    }
    println!("Solution is valid");
    println!("cost = {}", total_cost);
    Ok(())
}

pub fn generate(
    rand_hash: String,
    num_elements: usize,
    num_subsets: usize,
    nonce: u64,
    output: Option<PathBuf>,
) -> Result<()> {
    let seed = seed_from_str(&rand_hash, nonce);
    let track = Track {
        num_elements,
        num_subsets,
    };
    let instance = Instance::generate_instance(&seed, &track)?;
    let text = instance.to_text();
    match output {
        Some(path) => fs::write(&path, text)
            .map_err(|e| anyhow!("Failed to write instance to {}: {}", path.display(), e))?,
        None => print!("{}", text),
    }
    Ok(())
}

fn load_instance(path: &Path) -> Result<Instance> {
    Instance::from_path(path)
        .map_err(|e| anyhow!("Failed to load instance {}: {}", path.display(), e))
}
