use actix_web::{App, HttpServer, web};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use catalog_api::db::establish_connection_pool;
use catalog_api::models::config::ServerConfig;
use catalog_api::repository::DieselRepository;
use catalog_api::routes;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = ServerConfig::load().map_err(std::io::Error::other)?;

    let pool = establish_connection_pool(&config.database_url).map_err(std::io::Error::other)?;
    {
        let mut conn = pool.get().map_err(std::io::Error::other)?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(std::io::Error::other)?;
    }
    let repo = DieselRepository::new(pool);

    log::info!("Server has started on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(repo.clone()))
            .service(routes::main::index)
            // Fixed-segment routes register before the `{id}` catch-alls.
            .service(routes::categories::search_categories)
            .service(routes::categories::create_categories)
            .service(routes::categories::list_categories)
            .service(routes::categories::create_category)
            .service(routes::categories::get_category)
            .service(routes::categories::update_category)
            .service(routes::categories::delete_category)
            .service(routes::products::search_products)
            .service(routes::products::list_products_by_category)
            .service(routes::products::create_products)
            .service(routes::products::list_products)
            .service(routes::products::create_product)
            .service(routes::products::get_product)
            .service(routes::products::update_product)
            .service(routes::products::delete_product)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
