use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use prompt_lab_server::{
    app_state::AppState, config::Config, handlers, middleware::RequestIdMiddleware,
};

fn build_cors(config: &Config) -> Cors {
    match &config.cors_allowed_origin {
        Some(origin) => Cors::default()
            .allowed_origin(origin)
            .allowed_methods(vec!["GET", "POST", "DELETE"])
            .allow_any_header()
            .max_age(3600),
        None => Cors::permissive(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    if let Err(e) = config.validate() {
        log::warn!("{}", e);
    }

    let host = config.web_server_host.clone();
    let port = config.web_server_port;
    let state = web::Data::new(AppState::new(config));

    log::info!("starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .wrap(build_cors(&state.config))
            .configure(handlers::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
