use clap::Parser;
use simswitch::utils::{logger, validation::Validate};
use simswitch::{CliConfig, FilePlatform, SlotAssignmentSet, SwitchEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting simswitch");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let request = match config.request() {
        Ok(request) => request,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let platform = FilePlatform::new(&config.state);
    let engine = SwitchEngine::new(platform.clone(), platform);

    let result = if config.dry_run {
        tracing::info!("🔍 Dry run: computing the mapping without applying it");
        engine.plan(&request).await
    } else {
        engine.activate(&request).await
    };

    match result {
        Ok(mapping) => {
            tracing::info!("✅ Slot mapping computed successfully");
            print_mapping(&mapping, config.dry_run);
        }
        Err(e) => {
            tracing::error!(
                "❌ Activation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                simswitch::utils::error::ErrorSeverity::Low => 0,
                simswitch::utils::error::ErrorSeverity::Medium => 2,
                simswitch::utils::error::ErrorSeverity::High => 1,
                simswitch::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn print_mapping(mapping: &SlotAssignmentSet, dry_run: bool) {
    if dry_run {
        println!("🔍 Computed mapping (not applied):");
    } else {
        println!("✅ Applied mapping:");
    }
    for assignment in mapping.iter() {
        println!(
            "  logical {} -> physical {} ({:?}) port {}",
            assignment.logical_slot,
            assignment.physical_slot.index,
            assignment.physical_slot.kind,
            assignment.port
        );
    }
}
