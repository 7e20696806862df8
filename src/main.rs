use std::sync::Arc;

use tracing::{error, info, warn};

use msa_admin::console::{ConsoleContext, Shell, StdioTerminal};
use msa_admin::{ApiClient, Config, I18n, SessionHolder, SessionStore};

fn main() {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    // Load configuration
    let mut config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {config_path}: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };
    config.apply_env_overrides();
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        std::process::exit(2);
    }

    // Initialize logging
    if let Err(e) = msa_admin::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        msa_admin::logging::init_console_only(&config.logging.level);
    }

    info!("MSA Admin console starting");
    info!(
        auth = %config.api.auth_base_url,
        member = %config.api.member_base_url,
        board = %config.api.board_base_url,
        "service endpoints"
    );

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to start runtime: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run(config)) {
        error!("console failed: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(config: Config) -> msa_admin::Result<()> {
    let i18n = Arc::new(I18n::load_with_overrides(
        &config.locale.language,
        &config.locale.locales_dir,
    )?);
    let api = ApiClient::new(&config.api, Arc::clone(&i18n))?;
    info!(locale = i18n.locale(), "locale loaded");
    let store = SessionStore::open(&config.session.storage_path).unwrap_or_else(|e| {
        warn!(
            path = %config.session.storage_path,
            error = %e,
            "session file unavailable; sessions last until the console closes"
        );
        SessionStore::in_memory()
    });
    let session = SessionHolder::restore(store);

    let config = Arc::new(config);
    let mut shell = Shell::new(&config);
    let mut ctx = ConsoleContext::new(StdioTerminal::new(), api, session, i18n, config);
    shell.run(&mut ctx, "/").await
}
