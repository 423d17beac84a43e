use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;

use printfarm_scheduler::config::Config;
use printfarm_scheduler::routes::{configure, json_config, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    // Guard must outlive the server
    let _sentry = config.sentry_dsn.as_deref().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    let port = config.port;
    let json_limit = config.json_limit;
    log::info!(
        "Starting server on http://127.0.0.1:{} (solver {:?}, time limit {:?})",
        port,
        config.solver,
        config.solve_options.time_limit
    );

    let state = web::Data::new(AppState { config });
    HttpServer::new(move || {
        App::new()
            .wrap(sentry_actix::Sentry::new())
            .wrap(Logger::default())
            .app_data(state.clone())
            .app_data(json_config(json_limit))
            .configure(configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
