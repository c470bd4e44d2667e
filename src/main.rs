use clap::Parser;
use model_shelf::utils::{logger, validation::Validate};
use model_shelf::{CliConfig, LocalFileStore, SelectiveMover, ShelfEngine};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.severity().exit_code());
    }

    let print_json = config.json;
    let mover = SelectiveMover::new(LocalFileStore::new(), config);
    let engine = ShelfEngine::new(mover);

    match engine.run() {
        Ok(report) => {
            if print_json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Move failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = e.severity().exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
