//! Mints a bearer token for local development.
//!
//! Usage: `issue_token <user-id> <email> [name]`

use std::env;

use chrono::Duration;
use dotenvy::dotenv;

use estimator::auth::TokenVerifier;
use estimator::models::config::ServerConfig;

fn main() {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let args = env::args().skip(1).collect::<Vec<_>>();
    let (sub, email, name) = match args.as_slice() {
        [sub, email] => (sub, email, None),
        [sub, email, name] => (sub, email, Some(name.as_str())),
        _ => {
            eprintln!("usage: issue_token <user-id> <email> [name]");
            std::process::exit(2);
        }
    };

    let server_config = match ServerConfig::load() {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {err}");
            std::process::exit(1);
        }
    };

    let verifier = TokenVerifier::new(&server_config.jwt_secret);
    match verifier.issue(sub, email, name, Duration::hours(server_config.token_ttl_hours)) {
        Ok(token) => println!("{token}"),
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    }
}
