use std::sync::Arc;

use auth::PasswordHasher;
use auth::SessionManager;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use trading_admin::config::Config;
use trading_admin::domain::auth::service::Authenticator;
use trading_admin::domain::entity::service::EntityService;
use trading_admin::domain::user::ports::UserRepository;
use trading_admin::domain::user::service::UserService;
use trading_admin::inbound::http::router::create_router;
use trading_admin::inbound::http::router::AppState;
use trading_admin::repositories::PostgresBidListRepository;
use trading_admin::repositories::PostgresCurvePointRepository;
use trading_admin::repositories::PostgresRatingRepository;
use trading_admin::repositories::PostgresRuleNameRepository;
use trading_admin::repositories::PostgresTradeRepository;
use trading_admin::repositories::PostgresUserRepository;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trading_admin=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "trading-admin",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        default_page_size = config.pagination.default_page_size,
        max_page_size = config.pagination.max_page_size,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let user_repository: Arc<dyn UserRepository> =
        Arc::new(PostgresUserRepository::new(pg_pool.clone()));

    let state = AppState {
        bid_lists: Arc::new(EntityService::new(Arc::new(
            PostgresBidListRepository::new(pg_pool.clone()),
        ))),
        curve_points: Arc::new(EntityService::new(Arc::new(
            PostgresCurvePointRepository::new(pg_pool.clone()),
        ))),
        ratings: Arc::new(EntityService::new(Arc::new(PostgresRatingRepository::new(
            pg_pool.clone(),
        )))),
        rule_names: Arc::new(EntityService::new(Arc::new(
            PostgresRuleNameRepository::new(pg_pool.clone()),
        ))),
        trades: Arc::new(EntityService::new(Arc::new(PostgresTradeRepository::new(
            pg_pool.clone(),
        )))),
        users: Arc::new(UserService::new(
            Arc::clone(&user_repository),
            PasswordHasher::new(),
        )),
        authenticator: Arc::new(Authenticator::new(
            Arc::clone(&user_repository),
            PasswordHasher::new(),
        )),
        sessions: Arc::new(SessionManager::new(
            config.session.secret.as_bytes(),
            config.session.validity_hours,
        )),
        pagination: config.pagination.clone(),
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let application = create_router(state);
    axum::serve(http_listener, application).await?;

    Ok(())
}
