use clap::Parser;
use simswitch::config::toml_config::ScenarioConfig;
use simswitch::utils::{logger, validation::Validate};
use simswitch::{FilePlatform, SwitchEngine};

#[derive(Parser)]
#[command(name = "toml-scenario")]
#[command(about = "Run a scripted sequence of slot activations from a TOML file")]
struct Args {
    /// Path to the TOML scenario file
    #[arg(short, long, default_value = "scenario.toml")]
    config: String,

    /// Where the evolving device state is written between steps
    #[arg(long, default_value = "scenario-state.json")]
    state: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Validate and describe the scenario without running any step
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting scenario runner");
    tracing::info!("📁 Loading scenario from: {}", args.config);

    let config = match ScenarioConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load scenario '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Scenario validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    display_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 Dry run requested, no step will be executed");
        return Ok(());
    }

    let platform = FilePlatform::new(&args.state);
    platform.seed(&config.device)?;
    let engine = SwitchEngine::new(platform.clone(), platform);

    for (i, step) in config.steps.iter().enumerate() {
        let request = step.request();
        tracing::info!(
            "▶ Step {}: activate slot {} port {} (multi_profile={})",
            i + 1,
            step.slot,
            step.port,
            step.multi_profile
        );

        let applied = match engine.activate(&request).await {
            Ok(applied) => applied,
            Err(e) => {
                tracing::error!("❌ Step {} failed: {}", i + 1, e);
                eprintln!("❌ Step {} failed: {}", i + 1, e.user_friendly_message());
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(1);
            }
        };

        if let Err(e) = step.check_expectation(&applied) {
            tracing::error!("❌ Step {} expectation not met: {}", i + 1, e);
            eprintln!("❌ Step {} expectation not met", i + 1);
            eprintln!("   {}", e);
            std::process::exit(1);
        }

        println!("✅ Step {}: {:?}", i + 1, applied.assignments());
    }

    println!("✅ Scenario '{}' completed", config.scenario.name);
    println!("📁 Final device state in: {}", args.state);

    Ok(())
}

fn display_summary(config: &ScenarioConfig, args: &Args) {
    println!("📋 Scenario Summary:");
    println!("  Name: {}", config.scenario.name);
    if let Some(description) = &config.scenario.description {
        println!("  Description: {}", description);
    }
    println!("  Physical slots: {}", config.device.len());
    println!("  Steps: {}", config.steps.len());
    println!("  State file: {}", args.state);

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}
