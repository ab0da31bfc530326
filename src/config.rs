use std::env;

use sqlx::postgres::PgConnectOptions;

/// Returns the value of the named environment variable if it exists or panics.
pub fn get_variable(name: &str) -> String {
    env::var(name).unwrap_or_else(|_| panic!("must define {} environment variable", name))
}

/// Assembles Postgres connection options from the discrete `BACKEND_DB_*`
/// variables (host, port, username, password, database).
pub fn get_connect_options() -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&get_variable("BACKEND_DB_HOST"))
        .port(
            get_variable("BACKEND_DB_PORT")
                .parse()
                .expect("parse BACKEND_DB_PORT as u16"),
        )
        .username(&get_variable("BACKEND_DB_USERNAME"))
        .password(&get_variable("BACKEND_DB_PASSWORD"))
        .database(&get_variable("BACKEND_DB_DATABASE"))
}
