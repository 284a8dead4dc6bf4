//! Example demonstrating tag namespaces, option merging and nesting
//!
//! A field may carry keys under several tag namespaces; `Options::tag`
//! selects one at decode time. Overrides merge left to right, and `required`
//! latches once set.

use envtag::{EnvDecode, FromEnv, Options};

#[derive(Debug, Default, EnvDecode)]
struct Database {
    #[env(key = "DB_HOST", tag(deploy = "DEPLOY_DB_HOST"))]
    host: String,

    #[env(key = "DB_PORT", tag(deploy = "DEPLOY_DB_PORT"))]
    port: u16,
}

#[derive(Debug, Default, EnvDecode)]
struct Config {
    #[env(key = "NAME")]
    name: String,

    #[env(nested)]
    database: Database,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("NAME", "svc");
    std::env::set_var("DB_HOST", "localhost");
    std::env::set_var("DB_PORT", "5432");
    std::env::set_var("DEPLOY_DB_HOST", "db.prod.internal");
    std::env::set_var("DEPLOY_DB_PORT", "6432");

    let local = Config::from_env()?;
    println!("local:  {}:{}", local.database.host, local.database.port);

    let deploy = Config::from_env_with(&[Options {
        tag: "deploy".into(),
        required: true,
    }])?;
    println!("deploy: {}:{}", deploy.database.host, deploy.database.port);

    Ok(())
}
