mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::{CatalogConfig, Config};
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::ads::{routes as ads_routes, AdService};
use crate::features::articles::{routes as articles_routes, ArticleService};
use crate::features::auth;
use crate::features::auth::routes as auth_routes;
use crate::features::categories::{routes as categories_routes, CategoryService};
use crate::features::dashboard::{routes as dashboard_routes, DashboardService};
use crate::features::invoices::{routes as invoices_routes, InvoiceService, InvoiceSettingsService};
use crate::features::pricing::{routes as pricing_routes, PricingSettingsService};
use crate::features::seo::{routes as seo_routes, SeoService};
use crate::features::slots::{routes as slots_routes, SlotService};
use crate::features::uploads::{routes as uploads_routes, UploadService};
use crate::modules::storage::{ObjectStorage, S3Storage};
use axum::{extract::DefaultBodyLimit, middleware::from_fn, Router};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Every feature service, wired once at startup
struct Services {
    pricing: Arc<PricingSettingsService>,
    slots: Arc<SlotService>,
    categories: Arc<CategoryService>,
    invoice_settings: Arc<InvoiceSettingsService>,
    invoices: Arc<InvoiceService>,
    ads: Arc<AdService>,
    dashboard: Arc<DashboardService>,
    articles: Arc<ArticleService>,
    seo: Arc<SeoService>,
    uploads: Arc<UploadService>,
}

impl Services {
    fn new(
        pool: PgPool,
        storage: Arc<dyn ObjectStorage>,
        catalog: &CatalogConfig,
        public_base_url: String,
    ) -> Self {
        let pricing = Arc::new(PricingSettingsService::new(pool.clone(), catalog));
        let slots = Arc::new(SlotService::new(
            pool.clone(),
            Arc::clone(&pricing),
            catalog.clone(),
        ));
        let categories = Arc::new(CategoryService::new(
            pool.clone(),
            Arc::clone(&slots),
            Arc::clone(&pricing),
            catalog.clone(),
        ));
        let invoice_settings = Arc::new(InvoiceSettingsService::new(pool.clone()));
        let invoices = Arc::new(InvoiceService::new(
            pool.clone(),
            Arc::clone(&storage),
            Arc::clone(&invoice_settings),
            catalog.clone(),
        ));
        let ads = Arc::new(AdService::new(
            pool.clone(),
            Arc::clone(&invoices),
            catalog.clone(),
        ));
        let dashboard = Arc::new(DashboardService::new(pool.clone(), catalog));
        let articles = Arc::new(ArticleService::new(pool));
        let seo = Arc::new(SeoService::new(
            Arc::clone(&categories),
            Arc::clone(&articles),
            public_base_url,
        ));
        let uploads = Arc::new(UploadService::new(storage));

        Self {
            pricing,
            slots,
            categories,
            invoice_settings,
            invoices,
            ads,
            dashboard,
            articles,
            seo,
            uploads,
        }
    }

    /// Storefront, articles and crawler files
    fn public_routes(&self) -> Router {
        Router::new()
            .merge(categories_routes::routes(Arc::clone(&self.categories)))
            .merge(slots_routes::routes(Arc::clone(&self.slots)))
            .merge(pricing_routes::routes(Arc::clone(&self.pricing)))
            .merge(ads_routes::routes(Arc::clone(&self.ads)))
            .merge(articles_routes::routes(Arc::clone(&self.articles)))
            .merge(seo_routes::routes(Arc::clone(&self.seo)))
    }

    /// Admin routes, relative to `/api/admin`
    fn admin_routes(&self) -> Router {
        Router::new()
            .merge(dashboard_routes::admin_routes(Arc::clone(&self.dashboard)))
            .merge(slots_routes::admin_routes(Arc::clone(&self.slots)))
            .merge(ads_routes::admin_routes(Arc::clone(&self.ads)))
            .merge(pricing_routes::admin_routes(Arc::clone(&self.pricing)))
            .merge(invoices_routes::admin_routes(
                Arc::clone(&self.invoices),
                Arc::clone(&self.invoice_settings),
            ))
            .merge(articles_routes::admin_routes(Arc::clone(&self.articles)))
            .merge(uploads_routes::admin_routes(Arc::clone(&self.uploads)))
    }
}

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "System info: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    let pool = database::connect_and_migrate(&config.database).await?;

    // Auth: token verification plus profile-based admin lookup
    let jwks_client = Arc::new(auth::JwksClient::new(
        &config.auth.jwks_url,
        config.auth.jwks_cache_ttl,
    ));
    let jwt_validator = Arc::new(auth::JwtValidator::new(
        jwks_client,
        config.auth.issuer.clone(),
        config.auth.audience.clone(),
        config.auth.jwt_leeway,
    ));
    let auth_service = Arc::new(auth::AuthService::new(pool.clone()));
    let auth_state = middleware::AuthState {
        validator: jwt_validator,
        auth_service: Arc::clone(&auth_service),
    };
    tracing::info!("Auth configuration initialized");

    let storage: Arc<dyn ObjectStorage> = Arc::new(
        S3Storage::connect(config.storage.clone())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to initialize object storage: {}", e))?,
    );
    tracing::info!("Object storage ready for bucket: {}", config.storage.bucket);

    let services = Services::new(
        pool,
        storage,
        &config.catalog,
        config.app.public_base_url.clone(),
    );
    tracing::info!("Feature services initialized");

    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // Protected routes (require JWT authentication)
    let protected_routes = Router::new()
        .merge(auth_routes::protected_routes(auth_service))
        .nest("/api/admin", services.admin_routes())
        .route_layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    let app = Router::new()
        .merge(swagger)
        .merge(protected_routes)
        .merge(services.public_routes())
        .merge(health_route)
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::lazy_test_pool;
    use crate::modules::storage::memory::MemoryStorage;
    use crate::shared::test_helpers::{with_admin_auth, with_user_auth};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn services() -> Services {
        Services::new(
            lazy_test_pool(),
            Arc::new(MemoryStorage::default()),
            &CatalogConfig::default(),
            "https://example.lt".to_string(),
        )
    }

    fn admin_app(wrap: fn(Router) -> Router) -> TestServer {
        let app = Router::new().nest("/api/admin", wrap(services().admin_routes()));
        TestServer::new(app).unwrap()
    }

    const ADMIN_GETS: [&str; 6] = [
        "/api/admin/dashboard",
        "/api/admin/slots",
        "/api/admin/ads",
        "/api/admin/invoices",
        "/api/admin/articles",
        "/api/admin/ad-pricing",
    ];

    #[tokio::test]
    async fn test_admin_routes_require_a_user() {
        let server = admin_app(|router| router);
        for path in ADMIN_GETS {
            server
                .get(path)
                .expect_failure()
                .await
                .assert_status(StatusCode::UNAUTHORIZED);
        }
    }

    #[tokio::test]
    async fn test_admin_routes_refuse_non_admins() {
        let server = admin_app(with_user_auth);
        for path in ADMIN_GETS {
            let response = server.get(path).expect_failure().await;
            response.assert_status(StatusCode::FORBIDDEN);
            let body: Value = response.json();
            assert_eq!(body["success"], json!(false));
        }
    }

    #[tokio::test]
    async fn test_admin_validation_runs_before_database() {
        let server = admin_app(with_admin_auth);
        let response = server
            .put("/api/admin/invoice-settings")
            .json(&json!({
                "company_name": "UAB Vizijos",
                "company_code": "300000000",
                "email": "not-an-email"
            }))
            .expect_failure()
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_robots_served_without_database() {
        let server = TestServer::new(services().public_routes()).unwrap();
        let response = server.get("/robots.txt").await;
        response.assert_status_ok();
        let text = response.text();
        assert!(text.contains("Sitemap: https://example.lt/sitemap.xml"));
        assert!(text.contains("Disallow: /dashboard"));
    }
}
