use cgroup_limits::config::Config;
use cgroup_limits::logging;
use cgroup_limits::system::LimitsReport;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::from_env()?;
    logging::init(&config.logging)?;

    info!("cgroup_limits {}", cgroup_limits::VERSION);
    config.log_summary();

    let report = LimitsReport::collect(&config.paths);
    report.log_summary();

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
