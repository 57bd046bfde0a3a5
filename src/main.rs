mod conf;
mod controller;
mod db;
mod http;
mod model;
mod provider;
mod relay;
mod repository;
mod service;

use conf::Conf;
use provider::AwesomeApi;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use relay::Relay;
use repository::ExchangeRateRepository;
use rocket::{catchers, routes, Build, Rocket};
use service::ExchangeRateService;
use std::{env, process::exit};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[rocket::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = env::args().skip(1).collect();

    let conf = Conf::new().unwrap_or_else(|e| {
        error!(%e, "Failed to load configuration");
        exit(1);
    });

    match args.first().map(String::as_str) {
        None | Some("server") => server(conf).await,
        Some("client") => client(conf).await,
        _ => {
            error!(?args, "Unknown argument");
            exit(1);
        }
    }
}

async fn server(conf: Conf) {
    info!("Starting server");

    let pool = db::pool(&conf.db).unwrap_or_else(|e| {
        error!(%e, "Failed to prepare database");
        exit(1);
    });

    if let Err(e) = prepare(&conf, pool).launch().await {
        error!(%e, "Server stopped with an error");
        exit(1);
    }
}

async fn client(conf: Conf) {
    info!("Starting client");

    match Relay::new(conf.relay).run().await {
        Ok(path) => info!(path = %path.display(), "Exchange rate saved"),
        Err(e) => {
            error!(%e, "Failed to save exchange rate");
            exit(1);
        }
    }
}

pub fn prepare(conf: &Conf, pool: Pool<SqliteConnectionManager>) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("address", &conf.server.address))
        .merge(("port", conf.server.port));

    let service = ExchangeRateService::new(
        Box::new(AwesomeApi::new(conf.providers.awesome_api.clone())),
        ExchangeRateRepository::new(&pool),
        conf.db.insert_timeout(),
    );

    rocket::custom(figment)
        .mount("/", routes![controller::exchange_rate::get])
        .register("/", catchers![controller::default])
        .manage(service)
}
