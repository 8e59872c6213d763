//! Demo binary: builds the reference topology (the diamond-of-diamonds used
//! throughout the crate's tests) and drives it through a configurable number
//! of loops with a configurable pool size.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::Parser;
use log::{info, trace};
use rand::Rng;

use loopgraph::graph::GraphBuilder;
use loopgraph::{LoopCounter, Scheduler};

#[derive(Parser, Debug)]
#[command(about = "Runs the reference task graph for a number of loops")]
struct Args {
    /// Number of worker threads.
    #[arg(long, default_value_t = 5)]
    pool_size: usize,

    /// Number of loops to execute before shutting down.
    #[arg(long, default_value_t = 10)]
    loops: u32,

    /// Print the graph's adjacency before running.
    #[arg(long)]
    print_graph: bool,

    /// Add up to 20ms of random jitter to every task's sleep duration.
    #[arg(long)]
    jitter: bool,

    /// Log the execution trace at the end of every loop.
    #[arg(long)]
    log_trace: bool,
}

/// Sleeping "task", named after the reference implementation's
/// `GENERATE_TASK` macro: sleeps for `millis`, plus up to 20ms of jitter when
/// enabled.
fn sleepy_task(label: &'static str, millis: u64, jitter: bool) -> impl FnMut() + Send {
    move || {
        let sleep_for = if jitter {
            let extra = rand::thread_rng().gen_range(0..20);
            Duration::from_millis(millis + extra)
        } else {
            Duration::from_millis(millis)
        };
        trace!("{label} sleeping {sleep_for:?}");
        thread::sleep(sleep_for);
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let pool_size = NonZeroUsize::new(args.pool_size).expect("--pool-size must be nonzero");

    let loop_counter = LoopCounter::new();
    let mut builder = GraphBuilder::new();

    let entry_counter = loop_counter.clone();
    let a = builder.add_node("A", move || entry_counter.increment());
    let z = builder.add_node("Z", || {});

    let jitter = args.jitter;
    let node_a_ = builder.add_node("a", sleepy_task("a", 100, jitter));
    let node_b = builder.add_node("b", sleepy_task("b", 200, jitter));
    let node_c = builder.add_node("c", sleepy_task("c", 100, jitter));
    let node_1 = builder.add_node("1", sleepy_task("1", 20, jitter));
    let node_2 = builder.add_node("2", sleepy_task("2", 50, jitter));
    let node_3 = builder.add_node("3", sleepy_task("3", 50, jitter));
    let node_4 = builder.add_node("4", sleepy_task("4", 100, jitter));
    let node_i = builder.add_node("i", sleepy_task("i", 100, jitter));
    let node_j = builder.add_node("j", sleepy_task("j", 80, jitter));
    let node_k = builder.add_node("k", sleepy_task("k", 50, jitter));
    let node_x = builder.add_node("x", sleepy_task("x", 50, jitter));
    let node_y = builder.add_node("y", sleepy_task("y", 100, jitter));

    builder.add_edge(a, node_a_);
    builder.add_edge(a, node_b);
    builder.add_edge(a, node_c);
    builder.add_edge(node_a_, node_1);
    builder.add_edge(node_a_, node_2);
    builder.add_edge(node_b, node_2);
    builder.add_edge(node_c, node_3);
    builder.add_edge(node_c, node_4);
    builder.add_edge(node_1, node_i);
    builder.add_edge(node_1, node_j);
    builder.add_edge(node_2, node_k);
    builder.add_edge(node_3, node_k);
    builder.add_edge(node_4, z);
    builder.add_edge(node_i, node_x);
    builder.add_edge(node_j, node_x);
    builder.add_edge(node_j, node_y);
    builder.add_edge(node_k, node_y);
    builder.add_edge(node_x, z);
    builder.add_edge(node_y, z);

    builder.set_entry(a);
    builder.set_terminal(z);

    let graph = Arc::new(builder.build().expect("reference topology is well-formed"));

    if args.print_graph {
        print!("{}", graph.describe());
    }

    info!(
        "starting {} workers for {} loops",
        pool_size.get(),
        args.loops
    );

    let scheduler = Scheduler::new(Arc::clone(&graph), loop_counter, pool_size, args.loops)
        .expect("failed to start worker pool");
    scheduler.run();

    if args.log_trace {
        while scheduler.loop_index() < args.loops {
            thread::sleep(Duration::from_millis(10));
            let labels: Vec<&str> = scheduler
                .last_trace()
                .iter()
                .map(|&node| graph.label(node))
                .collect();
            trace!("trace so far: {labels:?}");
        }
    }

    scheduler.join();
    info!("done");
}
