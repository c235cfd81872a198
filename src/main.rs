//! FitAI backend entrypoint: load configuration, build the adapters once,
//! wire them into the router, and serve.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fitai::adapters::ai::GeminiProvider;
use fitai::adapters::auth::JwtTokenService;
use fitai::adapters::crypto::AesGcmFieldEncryptor;
use fitai::adapters::email::ResendEmailSender;
use fitai::adapters::http::{api_router, AppState};
use fitai::adapters::postgres::{
    PostgresChatRepository, PostgresPhotoRepository, PostgresSubscriptionRepository,
    PostgresUsageStore, PostgresUserRepository, PostgresVerificationCodeRepository,
    PostgresWorkoutRepository,
};
use fitai::adapters::rate_limiter::InMemoryRateLimiter;
use fitai::adapters::sms::TwilioSmsSender;
use fitai::adapters::stripe::StripeAdapter;
use fitai::application::handlers::subscriptions::PlanPrices;
use fitai::application::EntitlementGate;
use fitai::config::AppConfig;
use fitai::ports::RateLimiter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    init_tracing(&config);
    config.validate()?;

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let entitlements = Arc::new(EntitlementGate::new(
        Arc::new(PostgresSubscriptionRepository::new(pool.clone())),
        Arc::new(PostgresUsageStore::new(pool.clone())),
        config.server.usage_day_utc_offset_hours,
    ));

    let state = AppState {
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        codes: Arc::new(PostgresVerificationCodeRepository::new(pool.clone())),
        subscriptions: Arc::new(PostgresSubscriptionRepository::new(pool.clone())),
        usage: Arc::new(PostgresUsageStore::new(pool.clone())),
        workouts: Arc::new(PostgresWorkoutRepository::new(pool.clone())),
        chats: Arc::new(PostgresChatRepository::new(pool.clone())),
        photos: Arc::new(PostgresPhotoRepository::new(pool.clone())),
        ai: Arc::new(GeminiProvider::new(config.ai.clone())),
        payments: Arc::new(StripeAdapter::new(config.payment.clone())),
        sms: Arc::new(TwilioSmsSender::new(config.sms.clone())),
        email: Arc::new(ResendEmailSender::new(config.email.clone())),
        encryptor: Arc::new(AesGcmFieldEncryptor::new(config.encryption.key_bytes())),
        tokens: Arc::new(JwtTokenService::new(&config.auth)),
        entitlements,
        plan_prices: PlanPrices {
            base: config.payment.price_base.clone(),
            pro: config.payment.price_pro.clone(),
            unlimited: config.payment.price_unlimited.clone(),
        },
        stripe_webhook_secret: config.payment.webhook_secret().to_string(),
        default_country_code: config.sms.default_country_code.clone(),
        development_mode: !config.is_production(),
    };

    // 100 requests / 15 min globally, 5 / 15 min for auth endpoints
    let general_limiter: Arc<dyn RateLimiter> =
        Arc::new(InMemoryRateLimiter::new(Duration::from_secs(900), 100));
    let auth_limiter: Arc<dyn RateLimiter> =
        Arc::new(InMemoryRateLimiter::new(Duration::from_secs(900), 5));

    let app = api_router(
        state,
        general_limiter,
        auth_limiter,
        config.server.cors_origins_list(),
    );

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "FitAI backend listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone()));

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
