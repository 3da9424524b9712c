#[macro_use]
extern crate diesel;

mod auth;
mod config;
mod database;
mod models;
mod pages;
mod protocol;
mod schema;
mod session;
mod utils;

use actix_files::Files;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::Context;
use diesel::{r2d2::ConnectionManager, SqliteConnection};
use tracing_subscriber::EnvFilter;

use crate::{
    auth::roster::Roster, config::Config, database::seed::LoadOutcome, pages::render::Templates,
};

type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

/// Shared by every worker.
pub struct AppState {
    pub pool: DbPool,
    pub roster: Roster,
    pub templates: Templates,
}

#[cfg(test)]
pub fn test_state(roster: Roster) -> web::Data<AppState> {
    web::Data::new(AppState {
        pool: database::test_pool(),
        roster,
        templates: Templates::new().unwrap(),
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Bring the schema up to date and load seed files, if configured.
fn prepare_database(config: &Config) -> anyhow::Result<()> {
    let conn = database::establish(&config.database_url)?;
    database::migrations::run_migrations(&conn)?;
    tracing::info!(
        "Schema at v{} of v{}: {} tables, {} views",
        database::migrations::current_version(&conn)?,
        database::migrations::latest_version(),
        database::migrations::count_tables(&conn)?,
        database::migrations::count_views(&conn)?
    );

    if let Some(dir) = &config.seed_dir {
        let outcomes = database::seed::seed_all(&conn, dir)?;
        let inserted: usize = outcomes
            .iter()
            .map(|(_, outcome)| match outcome {
                LoadOutcome::Inserted(n) => *n,
                _ => 0,
            })
            .sum();
        tracing::info!("Seeding finished, {} new rows", inserted);
    }

    Ok(())
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let config = Config::from_env();
    prepare_database(&config)?;

    let pool = database::build_pool(&config.database_url)?;
    let roster = Roster::load(&config.roster_dir)?;
    if roster.is_empty() {
        tracing::warn!("Roster is empty, only patients can register");
    } else {
        tracing::info!("Roster holds {} names", roster.len());
    }
    let templates = Templates::new()?;
    let state = web::Data::new(AppState {
        pool,
        roster,
        templates,
    });

    let static_dir = config.static_dir.clone();
    tracing::info!("Listening on {}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .service(Files::new("/static", static_dir.clone()))
            // json
            .service(web::scope("/auth").configure(auth::config))
            // html
            .configure(pages::config)
    })
    .bind(&config.bind_addr)
    .with_context(|| format!("Failed to bind {}", config.bind_addr))?
    .run()
    .await
    .context("Server error")
}
