use std::io::Write;
use std::time::Instant;

use clap::Parser;
use env_logger::Builder;
use log::info;
use rand::prelude::*;
use rand_pcg::Pcg64;

use dslab_network_topology::{Regeneration, Topology};

const SEED: u64 = 123;

/// Network topology benchmarks
#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    /// Total number of hosts in topology
    #[arg(long = "hosts", default_value_t = 64)]
    host_count: usize,

    /// Number of stars in tree topology
    #[arg(long = "stars", default_value_t = 8)]
    star_count: usize,

    /// Number of level-1 (bottom) switches in fat-tree topology
    #[arg(long = "l1-switches", default_value_t = 8)]
    l1_switch_count: usize,

    /// Number of level-2 (top) switches in fat-tree topology
    #[arg(long = "l2-switches", default_value_t = 4)]
    l2_switch_count: usize,

    /// Number of delay queries
    #[arg(long = "queries", default_value_t = 1_000_000)]
    query_count: usize,
}

fn host(i: usize) -> String {
    format!("host_{}", i)
}

fn make_star_topology(topology: &mut Topology<String>, host_count: usize, rng: &mut Pcg64) {
    for i in 0..host_count {
        topology.add_link(host(i), "switch".to_string(), 1000., rng.gen_range(0.1..0.2));
    }
}

fn make_tree_topology(topology: &mut Topology<String>, star_count: usize, host_count: usize, rng: &mut Pcg64) {
    for i in 0..star_count {
        topology.add_link(format!("star_switch_{}", i), "root_switch".to_string(), 10000., 0.5);
    }
    for i in 0..host_count {
        let star_switch = format!("star_switch_{}", i % star_count);
        topology.add_link(host(i), star_switch, 1000., rng.gen_range(0.1..0.2));
    }
}

fn make_fat_tree_topology(
    topology: &mut Topology<String>,
    l2_switch_count: usize,
    l1_switch_count: usize,
    host_count: usize,
    rng: &mut Pcg64,
) {
    for i in 0..l1_switch_count {
        let switch_name = format!("l1_switch_{}", i);
        for j in 0..l2_switch_count {
            topology.add_link(switch_name.clone(), format!("l2_switch_{}", j), 10000., 0.5);
        }
    }
    for i in 0..host_count {
        let switch_name = format!("l1_switch_{}", i % l1_switch_count);
        topology.add_link(host(i), switch_name, 1000., rng.gen_range(0.1..0.2));
    }
}

fn run_benchmark(name: &str, args: &Args, regeneration: Regeneration) {
    let mut rng = Pcg64::seed_from_u64(SEED);
    let mut topology = Topology::new().with_regeneration(regeneration);

    let t = Instant::now();
    match name {
        "star" => make_star_topology(&mut topology, args.host_count, &mut rng),
        "tree" => make_tree_topology(&mut topology, args.star_count, args.host_count, &mut rng),
        "fat-tree" => make_fat_tree_topology(
            &mut topology,
            args.l2_switch_count,
            args.l1_switch_count,
            args.host_count,
            &mut rng,
        ),
        _ => unreachable!(),
    }
    let build_time = t.elapsed().as_secs_f64();

    let hosts: Vec<String> = (0..args.host_count).map(host).collect();
    let t = Instant::now();
    let mut total_delay = 0.;
    for _ in 0..args.query_count {
        let src = hosts.choose(&mut rng).unwrap();
        let dst = hosts.choose(&mut rng).unwrap();
        total_delay += topology.delay(src, dst);
    }
    let query_time = t.elapsed().as_secs_f64();

    info!(
        "{:<8} {:?}: {} nodes, {} links, build {:.3}s, {} queries {:.3}s, mean delay {:.3}",
        name,
        regeneration,
        topology.node_count(),
        topology.graph().link_count(),
        build_time,
        args.query_count,
        query_time,
        total_delay / args.query_count.max(1) as f64
    );
}

fn main() {
    Builder::from_default_env()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    let args = Args::parse();
    assert!(args.host_count > 0, "Host count must be positive");
    assert!(args.star_count > 0, "Star count must be positive");
    assert!(args.l1_switch_count > 0, "L1 switch count must be positive");
    assert!(args.l2_switch_count > 0, "L2 switch count must be positive");

    for name in ["star", "tree", "fat-tree"] {
        for regeneration in [Regeneration::Eager, Regeneration::Lazy] {
            run_benchmark(name, &args, regeneration);
        }
    }
}
