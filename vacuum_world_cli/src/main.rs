use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use vacuum_world_core::{
    Action, LOC_A, LOC_B, Location, Status,
    agent::{Agent, Program, TraceAgent},
    environment::{Environment, VacuumConfig, VacuumWorld},
    harness::compare_agents,
    policy::{ModelBasedVacuumAgent, RandomAgent, ReflexVacuumAgent, SimpleReflexAgent},
};

#[derive(Parser, Debug)]
#[command(version, about = "Two-room vacuum world simulator", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one agent in one environment and report its score.
    Run {
        /// Decision policy driving the agent.
        #[arg(long, value_enum, default_value = "reflex")]
        policy: PolicyArg,
        /// Initial status of room A.
        #[arg(long, value_enum, default_value = "dirty")]
        status_a: StatusArg,
        /// Initial status of room B.
        #[arg(long, value_enum, default_value = "clean")]
        status_b: StatusArg,
        /// Room the agent starts in.
        #[arg(long, value_enum, default_value = "a")]
        start: RoomArg,
        /// Randomize statuses and start room from this seed instead of
        /// the explicit flags above.
        #[arg(long, conflicts_with_all = ["status_a", "status_b", "start"])]
        seed: Option<u64>,
        /// Seed for the random policy's own action draws.
        #[arg(long, default_value_t = 0)]
        agent_seed: u64,
        /// Maximum number of time steps.
        #[arg(long, default_value_t = 20)]
        steps: usize,
        /// Log every percept/action pair of the agent.
        #[arg(long)]
        trace: bool,
    },
    /// Run every built-in policy over the same environment draws and
    /// report mean scores.
    Compare {
        /// Number of environment instances per policy.
        #[arg(long, default_value_t = 10)]
        n: usize,
        /// Maximum number of time steps per trial.
        #[arg(long, default_value_t = 1000)]
        steps: usize,
        /// Base seed for the environment draws.
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum PolicyArg {
    Reflex,
    SimpleReflex,
    ModelBased,
    Random,
}

impl PolicyArg {
    fn build(self, agent_seed: u64) -> Box<dyn Program> {
        match self {
            PolicyArg::Reflex => Box::new(ReflexVacuumAgent),
            PolicyArg::SimpleReflex => Box::new(SimpleReflexAgent),
            PolicyArg::ModelBased => Box::new(ModelBasedVacuumAgent::new()),
            PolicyArg::Random => Box::new(RandomAgent::new(
                vec![
                    Action::Left,
                    Action::Right,
                    Action::Suck,
                ],
                agent_seed,
            )),
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum StatusArg {
    Clean,
    Dirty,
}

impl From<StatusArg> for Status {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Clean => Status::Clean,
            StatusArg::Dirty => Status::Dirty,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum RoomArg {
    A,
    B,
}

impl From<RoomArg> for Location {
    fn from(room: RoomArg) -> Self {
        match room {
            RoomArg::A => LOC_A,
            RoomArg::B => LOC_B,
        }
    }
}

fn run_once(
    policy: PolicyArg,
    config: VacuumConfig,
    agent_seed: u64,
    steps: usize,
    trace: bool,
) -> Result<()> {
    let mut env = Environment::new(VacuumWorld::new(config));
    let program = policy.build(agent_seed);
    let program: Box<dyn Program> = if trace {
        Box::new(TraceAgent::new("vacuum", program))
    } else {
        program
    };
    env.add_agent(Agent::new("vacuum", program), None)?;
    env.run(steps);

    let agent = &env.agents()[0];
    println!("policy:      {:?}", policy);
    println!("performance: {}", agent.performance);
    println!("location:    {:?}", agent.entity.location);
    println!(
        "world:       A={:?} B={:?}",
        env.world().status(LOC_A),
        env.world().status(LOC_B)
    );
    Ok(())
}

fn run_comparison(n: usize, steps: usize, seed: u64) -> Result<()> {
    let mut next_seed = seed;
    let env_factory = move || {
        let env = Environment::new(VacuumWorld::new(VacuumConfig::Random { seed: next_seed }));
        next_seed = next_seed.wrapping_add(1);
        env
    };
    let factories: [(&str, &dyn Fn() -> Box<dyn Program>); 4] = [
        ("reflex", &|| Box::new(ReflexVacuumAgent)),
        ("simple-reflex", &|| Box::new(SimpleReflexAgent)),
        ("model-based", &|| Box::new(ModelBasedVacuumAgent::new())),
        ("random", &|| {
            Box::new(RandomAgent::new(
                vec![
                    Action::Left,
                    Action::Right,
                    Action::Suck,
                ],
                0,
            ))
        }),
    ];
    let results = compare_agents(env_factory, &factories, n, steps)?;
    println!("mean performance over {} trials, {} steps each:", n, steps);
    for (name, mean) in results {
        println!("  {:<14} {:>8.2}", name, mean);
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    match args.command {
        Command::Run {
            policy,
            status_a,
            status_b,
            start,
            seed,
            agent_seed,
            steps,
            trace,
        } => {
            let config = match seed {
                Some(seed) => VacuumConfig::Random { seed },
                None => VacuumConfig::Explicit {
                    status_a: status_a.into(),
                    status_b: status_b.into(),
                    start: start.into(),
                },
            };
            run_once(policy, config, agent_seed, steps, trace)
        }
        Command::Compare { n, steps, seed } => run_comparison(n, steps, seed),
    }
}
