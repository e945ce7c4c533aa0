use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use quizdeck_server::{app_state::AppState, config::Config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = AppState::new(config)
        .await
        .unwrap_or_else(|err| panic!("failed to initialize application state: {}", err));

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .service(handlers::health_check)
            .service(handlers::get_quiz)
            .service(handlers::save_quiz)
            .service(handlers::list_course_quizzes)
            .service(handlers::submit_attempt)
            .service(handlers::list_attempts)
            .service(handlers::get_analytics)
    })
    .bind((host, port))?
    .run()
    .await
}
