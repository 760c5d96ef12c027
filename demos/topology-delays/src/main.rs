use std::io::Write;

use clap::Parser;
use env_logger::Builder;
use log::info;

use dslab_network_topology::{NetworkTopology, NullTopology, Regeneration, Topology, TopologyConfig};

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
/// Prints network delays and bandwidths between simulation actors
struct Args {
    /// Path to topology config in YAML format
    #[arg(short, long)]
    config: Option<String>,

    /// Treat links as one-way when computing delays
    #[arg(long)]
    directed_delay: bool,

    /// Treat links as one-way when computing bandwidths
    #[arg(long)]
    directed_bandwidth: bool,

    /// Recompute matrices on first query after a change
    #[arg(long)]
    lazy: bool,
}

const ACTORS: [&str; 7] = [
    "broker", "datacenter", "client1", "client2", "server1", "switch1", "switch2",
];

fn print_delays(title: &str, topology: &dyn NetworkTopology<&'static str>, pairs: &[(&'static str, &'static str)]) {
    info!("{} (network enabled: {})", title, topology.is_network_enabled());
    for (src, dst) in pairs {
        info!(
            "  {:>10} -> {:<10} delay {:>6.3}  bandwidth {:>6.1}",
            src,
            dst,
            topology.delay(src, dst),
            topology.bandwidth(src, dst)
        );
    }
}

fn main() {
    Builder::from_default_env()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => TopologyConfig::from_file(path),
        None => TopologyConfig::default(),
    };
    config.directed_delay |= args.directed_delay;
    config.directed_bandwidth |= args.directed_bandwidth;
    if args.lazy {
        config.regeneration = Regeneration::Lazy;
    }
    info!("{:?}", config);

    let broker_pairs = [("broker", "datacenter"), ("datacenter", "broker")];
    print_delays("no network", &NullTopology, &broker_pairs);

    // broker and datacenter connected by a single link
    let mut topology = Topology::with_config(config);
    print_delays("empty topology", &topology, &broker_pairs);
    topology.add_link("broker", "datacenter", 10., 1.);
    print_delays("single link", &topology, &broker_pairs);

    // clients and servers connected via two switches
    let mut topology = Topology::with_config(config).with_debug_node_names();
    topology.add_link("client1", "switch1", 100., 0.1);
    topology.add_link("client2", "switch1", 90., 0.1);
    topology.add_link("server1", "switch2", 90., 0.1);
    topology.add_link("switch1", "switch2", 50., 0.1);
    topology.add_link("broker", "client1", 1000., 0.01);

    let mut pairs = Vec::new();
    for src in ACTORS {
        for dst in ACTORS {
            if src != dst {
                pairs.push((src, dst));
            }
        }
    }
    print_delays("two switches", &topology, &pairs);

    if let Err(e) = topology.remove_link(&"switch1", &"switch2") {
        info!("link removal failed: {}", e);
    }

    println!("{}", topology.graph());
}
