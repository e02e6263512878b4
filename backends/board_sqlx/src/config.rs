use clap::Parser;

/// Runtime configuration, read from flags or the environment (a `.env` file is loaded first).
#[derive(Parser, Debug, Clone)]
#[command(name = "board", about = "Serve the forum article board")]
pub struct Config {
    /// SQLite connection string
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://board.db")]
    pub database_url: String,

    /// Maximum number of pooled database connections
    #[arg(long, env = "BOARD_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,

    /// Address to listen on, e.g. 127.0.0.1:3000
    #[arg(long, env = "BOARD_LISTEN", default_value = "127.0.0.1:3000")]
    pub listen: String,

    /// Shared secret used to verify session tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Where unauthenticated requests are redirected
    #[arg(long, env = "BOARD_LOGIN_URL", default_value = "/login")]
    pub login_url: String,
}
