use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use crm_backend::config::AppConfig;
use crm_backend::db::{permissions as permission_db, roles as role_db};
use crm_backend::services::users as user_service;
use crm_backend::state::AppState;
use crm_backend::{create_pool, handlers};
use dotenv::dotenv;
use migration::{Migrator, MigratorTrait};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = AppConfig::from_env();

    let db = create_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run database migrations");

    // Reference data: permission catalog and the protected admin role.
    let added = permission_db::sync_catalog(&db)
        .await
        .expect("Failed to sync permission catalog");
    if added > 0 {
        tracing::info!("Added {added} permission(s) to the catalog");
    }
    role_db::ensure_admin_role(&db)
        .await
        .expect("Failed to set up admin role");

    let master_admin_password = config.master_admin_password.clone();
    let port = config.port;
    let state = AppState::new(db, config);

    if let Some(password) = master_admin_password {
        match user_service::bootstrap_master_admin(&state, &password).await {
            Ok(true) => tracing::info!("Master admin account created"),
            Ok(false) => {}
            Err(e) => tracing::error!("Could not create master admin account: {e:?}"),
        }
    }

    let state_data = web::Data::new(state);

    let bind_addr = format!("0.0.0.0:{port}");
    tracing::info!("Server running at http://{bind_addr}");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
                actix_web::http::header::HeaderName::from_static("x-csrf-token"),
            ])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(state_data.clone())
            .service(web::scope("/api").configure(handlers::init_routes))
    })
    .bind(&bind_addr)?
    .run()
    .await
}
