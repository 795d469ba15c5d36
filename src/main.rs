use anyhow::{Context, Result};
use log::{error, info, warn};
use tasador::{
    bot::bot::TasadorTelegramBot,
    config,
    estimator::Estimator,
    logger::setup_logger,
    predictor,
    supervisor::{self, ServiceTasks},
    web::{self, AppState},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger
    setup_logger()?;

    let config = config::read_config().context("failed to read config")?;

    // Loaded once, shared read-only by every session
    let model_config = config.clone();
    let predictor = tokio::task::spawn_blocking(move || predictor::load(&model_config)).await?;
    let estimator = Estimator::new(predictor);
    if !estimator.is_available() {
        warn!("Starting without a model, every estimate will report it as unavailable");
    }

    let (shutdown_tx, _) = tokio::sync::broadcast::channel::<()>(1);
    let mut tasks = ServiceTasks::new();

    // HTTP API, bound here so a bad address fails startup
    if let Some(bind_addr) = &config.http_bind_address {
        let listener = web::bind(bind_addr).await?;
        let state = AppState {
            estimator: estimator.clone(),
        };
        let shutdown_rx = shutdown_tx.subscribe();
        tasks.spawn(web::start_http_server(state, listener, shutdown_rx));
    }

    // Telegram bot
    let mut bot_shutdown = None;
    if let Some(token) = &config.telegram_bot_token {
        let bot = TasadorTelegramBot::new(token, estimator.clone()).await?;
        let (bot_handle, shutdown_token) = bot.spawn();
        bot_shutdown = Some(shutdown_token);
        tasks.spawn(async move { bot_handle.await.context("telegram bot crashed") });
        info!("Telegram bot started");
    }

    let outcome = supervisor::wait_for_shutdown(&mut tasks, async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for ctrl-c: {}", err);
        }
    })
    .await;

    info!("Shutting down");
    let _ = shutdown_tx.send(());
    if let Some(token) = bot_shutdown {
        if let Ok(done) = token.shutdown() {
            done.await;
        }
    }
    supervisor::drain(&mut tasks).await;

    // A remote predictor owns a blocking HTTP client, which must not be
    // dropped on an async worker
    tokio::task::spawn_blocking(move || drop(estimator)).await?;

    outcome
}
