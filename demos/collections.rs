//! Example demonstrating list, map, duration and byte fields
//!
//! Lists are comma-separated tokens, maps are comma-separated `key:value`
//! pairs, and `Vec<u8>` fields receive the raw value's bytes verbatim.

use std::collections::HashMap;
use std::time::Duration;

use envtag::{EnvDecode, FromEnv};

#[derive(Debug, Default, EnvDecode)]
struct Config {
    #[env(key = "HOSTS")]
    hosts: Vec<String>,

    #[env(key = "RATE_LIMITS")]
    rate_limits: HashMap<String, u32>,

    #[env(key = "SHUTDOWN_GRACE")]
    shutdown_grace: Duration,

    #[env(key = "SESSION_SEED")]
    session_seed: Vec<u8>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("HOSTS", "a.example,b.example,c.example");
    std::env::set_var("RATE_LIMITS", "read:100,write:20");
    std::env::set_var("SHUTDOWN_GRACE", "1m30s");
    std::env::set_var("SESSION_SEED", "raw,bytes,with,commas");

    let config = Config::from_env()?;

    println!("Hosts: {:?}", config.hosts);
    println!("Rate limits: {:?}", config.rate_limits);
    println!("Shutdown grace: {:?}", config.shutdown_grace);
    println!("Session seed: {} bytes", config.session_seed.len());

    Ok(())
}
