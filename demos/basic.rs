//! Basic example: scalar fields decoded from the process environment

use envtag::{EnvDecode, FromEnv};

#[derive(Debug, Default, EnvDecode)]
struct Config {
    #[env(key = "APP_NAME")]
    name: String,

    #[env(key = "PORT")]
    port: u16,

    #[env(key = "DEBUG")]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("APP_NAME", "my-application");
    std::env::set_var("PORT", "8080");
    std::env::set_var("DEBUG", "true");

    let config = Config::from_env()?;

    println!("Configuration loaded:");
    println!("  Name: {}", config.name);
    println!("  Port: {}", config.port);
    println!("  Debug: {}", config.debug);

    Ok(())
}
