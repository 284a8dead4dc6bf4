//! Example demonstrating the single-key helpers
//!
//! `envtag::var` looks up one key and converts it by the requested type,
//! without declaring a struct.

use std::time::Duration;

use envtag::Error;

fn main() -> anyhow::Result<()> {
    std::env::set_var("WORKERS", "8");
    std::env::set_var("POLL_INTERVAL", "750ms");
    std::env::set_var("FEATURES", "metrics,tracing");

    let workers: usize = envtag::var("WORKERS")?;
    let poll: Duration = envtag::var("POLL_INTERVAL")?;
    let features: Vec<String> = envtag::var("FEATURES")?;

    println!("workers = {workers}");
    println!("poll interval = {poll:?}");
    println!("features = {features:?}");

    // a missing key names itself in the error
    match envtag::var::<String>("ABSENT_KEY") {
        Err(Error::NotFound { key }) => println!("as expected, '{key}' is not set"),
        other => println!("unexpected: {other:?}"),
    }

    Ok(())
}
