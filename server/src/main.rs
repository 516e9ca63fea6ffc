//! Signalist server binary.
//!
//! # Usage
//!
//! ```bash
//! # Development: console mail, in-process events, diagnostics on
//! DIAGNOSTICS_ENABLED=true cargo run -p signalist-server
//!
//! # Production: SMTP relay and hosted event API
//! NODEMAILER_EMAIL=alerts@example.com NODEMAILER_PASSWORD=... \
//! INNGEST_EVENT_KEY=... cargo run -p signalist-server --release
//! ```

use signalist_auth::{AuthApi, AuthEnvironment, AuthReducer, AuthState, HttpAuthProvider};
use signalist_core::environment::{Clock, SystemClock};
use signalist_core::event_bus::EventPublisher;
use signalist_inngest::InngestEventBus;
use signalist_mailer::{
    ConsoleMailTransport, EmailDispatcher, MailTransport, Sender, SmtpConfig, SmtpMailTransport,
};
use signalist_runtime::{Store, StoreConfig};
use signalist_server::welcome::spawn_welcome_emails;
use signalist_server::{Config, Diagnostics, LocalEventBus, build_router};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "signalist=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    info!(?config, "Configuration loaded");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let mailer = EmailDispatcher::new(
        mail_transport(&config),
        Sender::new(config.mail.sender_email.clone().unwrap_or_default()),
    );
    let (events, welcome) = event_publisher(&config, &mailer).await?;

    let env = AuthEnvironment::new(
        HttpAuthProvider::new(config.auth.base_url.clone()),
        Arc::clone(&events),
        Arc::clone(&clock),
    );
    let store = Arc::new(Store::with_config(
        AuthState::default(),
        AuthReducer::new(),
        env,
        &StoreConfig::default().with_broadcast_capacity(config.server.action_buffer),
    ));
    let api = AuthApi::new(Arc::clone(&store)).with_timeout(config.server.request_timeout);

    let diagnostics = config
        .diagnostics
        .enabled
        .then(|| Diagnostics::new(mailer.clone(), Arc::clone(&events), Arc::clone(&clock)));
    let router = build_router(api, diagnostics);

    let listener =
        tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    info!(address = %listener.local_addr()?, "Signalist server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped, waiting for running effects");
    if let Err(error) = store.shutdown(config.server.shutdown_timeout).await {
        warn!(%error, "Store did not drain before the shutdown timeout");
    }
    if let Some(handle) = welcome {
        handle.abort();
    }

    info!("Graceful shutdown complete");
    Ok(())
}

fn mail_transport(config: &Config) -> Arc<dyn MailTransport> {
    match (&config.mail.sender_email, &config.mail.password) {
        (Some(email), Some(password)) => {
            info!(host = %config.mail.smtp_host, port = config.mail.smtp_port, "Using SMTP mail transport");
            Arc::new(SmtpMailTransport::new(
                SmtpConfig::new(email.clone(), password.clone())
                    .with_host(config.mail.smtp_host.clone())
                    .with_port(config.mail.smtp_port),
            ))
        },
        _ => {
            warn!("NODEMAILER_EMAIL/NODEMAILER_PASSWORD not set, emails will be logged only");
            Arc::new(ConsoleMailTransport)
        },
    }
}

async fn event_publisher(
    config: &Config,
    mailer: &EmailDispatcher,
) -> anyhow::Result<(Arc<dyn EventPublisher>, Option<JoinHandle<()>>)> {
    if let Some(key) = &config.events.event_key {
        let bus = InngestEventBus::builder()
            .base_url(config.events.base_url.clone())
            .event_key(key.clone())
            .build()?;
        return Ok((Arc::new(bus), None));
    }

    warn!("INNGEST_EVENT_KEY not set, delivering events in-process");
    let bus = LocalEventBus::new();
    let handle = spawn_welcome_emails(&bus, mailer.clone()).await?;
    Ok((Arc::new(bus), Some(handle)))
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            warn!(%error, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            },
            Err(error) => {
                warn!(%error, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C signal"),
        () = terminate => info!("Received SIGTERM signal"),
    }
}
