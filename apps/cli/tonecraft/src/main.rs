use tonecraft::cli::Args;
use tonecraft::commands::{adjust_once, import_file};
use tonecraft::error::TonecraftError;
use tonecraft::logger::initialize as LoggerInitialize;
use tonecraft::repl::Repl;

use tone_core::config::{AppPaths, EnvDefaults};
use tone_core::orchestrator::Session;
use tone_core::{
    AdjustmentOrchestrator, AppConfig, CredentialStore, FileStore, MemoryStore, MistralClient,
    PreferenceStore, TextState, ToneState,
};

use common::Credential;

use std::io::stdout;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::{error, info};
use tokio::io::{BufReader, stdin};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            eprintln!("tonecraft: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ExitCode, TonecraftError> {
    let paths =
        AppPaths::resolve(args.config_dir.as_deref()).map_err(|e| TonecraftError::core(e))?;

    // Initialize logger FIRST
    LoggerInitialize(&paths.log_dir, args.verbose)?;

    info!("Tonecraft starting");
    info!(
        "Config directory: {} (from {})",
        paths.config_dir.display(),
        paths.source
    );
    info!("Log directory: {}", paths.log_dir.display());

    let env = EnvDefaults::load();
    let config = if args.ephemeral {
        AppConfig::load(&paths.config_dir)
    } else {
        AppConfig::load_or_create(&paths.config_dir)
    }
    .map_err(|e| TonecraftError::core(e))?
    .with_env(&env);

    let store: Arc<dyn PreferenceStore> = if args.ephemeral {
        info!("Ephemeral session: preferences kept in memory");
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(FileStore::open(&paths.config_dir).map_err(|e| TonecraftError::core(e))?)
    };

    let credentials =
        CredentialStore::load(store.clone(), env.api_key.as_ref().map(Credential::expose));
    info!("API key source: {}", credentials.source());

    let session = Session::new(
        credentials,
        TextState::new(config.ui.initial_text.as_str()),
        ToneState::load(store),
    );
    let client = MistralClient::new(&config.api).map_err(|e| TonecraftError::core(e))?;
    let (orchestrator, notifications) =
        AdjustmentOrchestrator::new(client, session, args.model.clone());

    if let Some(path) = &args.text_file {
        import_file(&orchestrator, path).await?;
    }

    if let Some(tone) = &args.tone {
        return run_once(&orchestrator, tone, args.json).await;
    }

    let mut repl = Repl::new(
        orchestrator,
        notifications,
        BufReader::new(stdin()),
        stdout(),
    );
    repl.run().await?;

    Ok(ExitCode::SUCCESS)
}

/// Non-interactive `--tone`: print the adjusted text (or JSON) to stdout.
async fn run_once(
    orchestrator: &AdjustmentOrchestrator,
    tone: &str,
    json: bool,
) -> Result<ExitCode, TonecraftError> {
    match adjust_once(orchestrator, tone).await {
        Ok(report) if json => {
            let rendered =
                serde_json::to_string_pretty(&report).map_err(|e| TonecraftError::io(e))?;
            println!("{rendered}");
            Ok(ExitCode::SUCCESS)
        }
        Ok(report) => {
            println!("{}", report.adjusted);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if json => {
            let rendered = serde_json::to_string_pretty(&e).map_err(|e| TonecraftError::io(e))?;
            println!("{rendered}");
            Ok(ExitCode::FAILURE)
        }
        Err(TonecraftError::Core { message, .. }) => {
            eprintln!("tonecraft: {message}");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e),
    }
}
