use clap::Parser;
use workshop_matchmaker::utils::{logger, validation::Validate};
use workshop_matchmaker::{
    AgentRequest, CliConfig, GroupingResponse, LocalStorage, MatchmakerEngine, MatchmakerError,
    MatchmakerPipeline, MatchmakerSettings, TomlConfig,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting workshop-matchmaker");

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ Matchmaking failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: &CliConfig) -> Result<(), MatchmakerError> {
    let mut settings = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let mut settings = TomlConfig::from_file(path)?.to_settings();
            if settings.api_key.is_none() {
                settings.api_key = cli.api_key.clone();
            }
            settings
        }
        None => cli.to_settings(),
    };
    settings.monitor |= cli.monitor;

    settings.validate()?;
    tracing::debug!("Settings: {:?}", settings);
    display_settings_summary(&settings);

    let storage = LocalStorage::new(settings.base_dir.clone());

    if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - the model will not be called");
        let pipeline = MatchmakerPipeline::new(storage, settings.clone(), DryRunModel);
        let engine = MatchmakerEngine::new_with_monitoring(pipeline, settings.monitor);
        let request = engine.prepare().await?;
        print_request(&request)?;
        return Ok(());
    }

    let client = settings.gemini_client()?;
    let monitor = settings.monitor;
    if monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let pipeline = MatchmakerPipeline::new(storage, settings, client);
    let engine = MatchmakerEngine::new_with_monitoring(pipeline, monitor);
    let response = engine.run().await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_groups(&response);
    }

    tracing::info!("✅ Matchmaking completed");
    Ok(())
}

fn display_settings_summary(settings: &MatchmakerSettings) {
    tracing::info!("📋 Roster: {}/{}", settings.base_dir, settings.roster_path);
    tracing::info!("🤖 Model: {} via {}", settings.model, settings.api_endpoint);
    tracing::info!("⏱️ Timeout: {}s", settings.timeout_seconds);
}

fn print_request(request: &AgentRequest) -> Result<(), MatchmakerError> {
    println!("=== Agent: {} ({}) ===", request.name, request.model);
    println!("{}", request.description);
    println!();
    println!("=== Instruction ===");
    println!("{}", request.instruction);
    println!();
    println!("=== Message ===");
    println!("{}", request.message);
    println!();
    println!("=== Output schema ===");
    println!("{}", serde_json::to_string_pretty(&request.output_schema)?);
    Ok(())
}

fn print_groups(response: &GroupingResponse) {
    if response.groups.is_empty() {
        println!("No groups were suggested.");
        return;
    }

    for (index, group) in response.groups.iter().enumerate() {
        println!("Group {}: {}", index + 1, group.members.join(", "));
        println!("  {}", group.description);
        println!();
    }
}

/// Stands in for the model during `--dry-run`; `prepare` never reaches it.
struct DryRunModel;

impl workshop_matchmaker::core::ModelInvoker for DryRunModel {
    async fn generate(&self, _request: &AgentRequest) -> Result<GroupingResponse, MatchmakerError> {
        Err(MatchmakerError::ConfigError {
            message: "model invocation is disabled during a dry run".to_string(),
        })
    }
}
