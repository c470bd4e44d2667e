use clap::Parser;
use model_shelf::config::toml_config::{LogFormat, ShelfPlan};
use model_shelf::utils::{logger, validation::Validate};
use model_shelf::{LocalFileStore, PlanRunner};

#[derive(Parser)]
#[command(name = "shelf-plan")]
#[command(about = "Run a sequence of model relocation jobs from a TOML plan")]
struct Args {
    /// Path to TOML plan file
    #[arg(short, long, default_value = "shelf-plan.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Run only the named job
    #[arg(long)]
    only: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 載入 TOML 配置，日誌尚未初始化前直接輸出到 stderr
    let plan = match ShelfPlan::from_file(&args.config) {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("❌ Failed to load plan file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    let level = if args.verbose { "debug" } else { plan.log_level() };
    logger::init_with_level(level, plan.log_format() == LogFormat::Json);

    tracing::info!("📁 Loaded plan from: {}", args.config);

    // 驗證配置
    if let Err(e) = plan.validate() {
        tracing::error!("❌ Plan validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.severity().exit_code());
    }

    let runner = PlanRunner::new(LocalFileStore::new(), plan);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let result = runner
        .execute_filtered(&mut out, args.only.as_deref())
        .and_then(|outcome| outcome.into_result());

    match result {
        Ok(outcome) => {
            tracing::info!(
                "✅ {} job(s) completed, {} file(s) moved",
                outcome.results.len(),
                outcome.total_moved()
            );
        }
        Err(e) => {
            tracing::error!(
                "❌ Plan failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.severity().exit_code().max(1));
        }
    }

    Ok(())
}
