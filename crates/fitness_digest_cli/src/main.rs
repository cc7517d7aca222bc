use fitness_digest::config::Config;

fn main() -> anyhow::Result<()> {
    fitness_digest_cli::init_tracing();

    let config = Config::from_env()?;
    tracing::info!(
        data_dir = %config.data_dir.display(),
        bodyweight_lbs = config.bodyweight_lbs,
        "fitness_digest: starting run"
    );

    let report = fitness_digest_cli::run(&config)?;
    tracing::info!(
        days = report.days,
        target_date = %report.target_date,
        outputs = report.written.len(),
        "fitness_digest: run complete"
    );
    Ok(())
}
