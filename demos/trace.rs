#[path = "../tests/common/mod.rs"]
mod reference;

use reference::dijkstra;
use sssp_step::{CsrGraph, Stepper, StepperConfig, TraceState};
use rand::{Rng, SeedableRng};
use rand::rngs::SmallRng;

fn make_random_graph(n: u32, avg_degree: f32, seed: u64) -> CsrGraph {
    let mut rng = SmallRng::seed_from_u64(seed);
    let deg = avg_degree.max(1.0) as usize;
    let mut edges = Vec::with_capacity(n as usize * deg);
    for u in 0..n {
        for _ in 0..deg {
            let v = rng.gen_range(0..n);
            let w: f64 = rng.gen_range(1.0..4.0);
            edges.push((u, v, w));
        }
    }
    CsrGraph::from_edges(n, &edges).expect("generated edges are in range")
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 4 {
        eprintln!("usage: trace <n> <density> <seed> [config-json]");
        std::process::exit(1);
    }
    let n: u32 = args[1].parse().expect("n");
    let density: f32 = args[2].parse().expect("density");
    let seed: u64 = args[3].parse().expect("seed");
    let config = match args.get(4) {
        Some(text) => StepperConfig::from_json(text).expect("config"),
        None => StepperConfig::default(),
    };

    let graph = make_random_graph(n, density, seed);
    let mut run = match Stepper::with_config(&graph, &0, config) {
        Ok(run) => run,
        Err(e) => {
            eprintln!("error {} ({e})", e.code());
            std::process::exit(1);
        }
    };
    let mut mirror = TraceState::new(run.vertices().iter().copied(), 0);
    while run.has_next_step() {
        let ev = run.step().expect("step while has_next_step");
        println!("{}", serde_json::to_string(&ev).expect("event json"));
        mirror.apply(&ev);
    }
    print!("{run}");

    let base = dijkstra(&graph, 0).expect("baseline");
    let mismatches = (0..n)
        .filter(|&v| {
            let d = run.distance_of(&v).unwrap_or(f64::NAN);
            let ok = d == base.dist[v as usize] && d.to_bits() == mirror.distance(&v).to_bits();
            !ok
        })
        .count();
    eprintln!(
        "n={n} m={} steps={} bound={} mismatches={mismatches}",
        graph.edge_count(),
        run.steps_taken(),
        run.max_steps()
    );
}
