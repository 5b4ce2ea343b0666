use std::{io, sync::Mutex};

use actix_web::{middleware::Logger, web::{self, Data}, App, HttpServer};

use thought_network::{config::Config, db::DB, routes};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let db = DB::open(&config.store).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    log::info!("document store: {:?}", config.store);

    let db = Data::new(Mutex::new(db));
    log::info!("listening on {}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .app_data(db.clone())
            .configure(routes::configure)
            .wrap(Logger::default())
            .default_service(web::to(routes::default_handler))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
