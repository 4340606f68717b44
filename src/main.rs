use nucsim::{Scenario, ScenarioConfig};

use anyhow::Result;
use clap::Parser;
use tracing::info;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short, default_value = "two_nuclei.yaml")]
    file_name: String,
}

// load here to keep main clean
fn load_scenario_from_yaml() -> Result<ScenarioConfig> {
    let args = Args::parse();
    let file_name = args.file_name;

    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(&file_name);
    let file = File::open(&config_path)?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;

    Ok(scenario_cfg)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();

    let scenario_cfg = load_scenario_from_yaml()?;
    let mut scenario = Scenario::build_scenario(scenario_cfg)?;
    scenario.run();

    info!(
        ticks = scenario.scheduler.tick_count(),
        t = scenario.scheduler.time(),
        "simulation finished"
    );
    for agent in scenario.scheduler.nuclei() {
        let c = agent.exposed().centre(0);
        info!(
            id = agent.id(),
            x = c.x,
            y = c.y,
            z = c.z,
            "final position of first sphere"
        );
    }

    //bench_contact_forces();
    //bench_tick();

    Ok(())
}
