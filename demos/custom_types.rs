//! Example demonstrating custom leaf conversions
//!
//! Two ways to take over conversion for a field:
//!
//! - implement `FromEnvValue` for the type (every field of that type is then
//!   decoded by your rule, even if the type is a struct)
//! - name a `deserializer` function on one field, e.g. JSON via
//!   `serde_json::from_str`

use envtag::{EnvDecode, FromEnv, FromEnvValue, Kind, ParseError};
use serde::Deserialize;

#[derive(Debug, Default, PartialEq)]
struct Endpoint {
    scheme: String,
    authority: String,
}

impl FromEnvValue for Endpoint {
    const KIND: Kind = Kind::Named("endpoint");

    fn from_env_value(raw: &str) -> Result<Self, ParseError> {
        match raw.split_once("://") {
            Some((scheme, authority)) => Ok(Endpoint {
                scheme: scheme.to_owned(),
                authority: authority.to_owned(),
            }),
            None => Err(ParseError::Unparseable {
                value: raw.to_owned(),
                kind: Self::KIND,
            }),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct TlsSettings {
    cert_path: String,
    verify_peer: bool,
}

#[derive(Debug, Default, EnvDecode)]
struct Config {
    // Decoded by the FromEnvValue impl above, not by struct recursion
    #[env(key = "UPSTREAM")]
    upstream: Endpoint,

    // Decoded by an explicit JSON deserializer
    #[env(key = "TLS", deserializer = "serde_json::from_str")]
    tls: TlsSettings,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("UPSTREAM", "https://api.internal:8443");
    std::env::set_var(
        "TLS",
        r#"{"cert_path":"/etc/ssl/service.pem","verify_peer":true}"#,
    );

    let config = Config::from_env()?;

    println!("Upstream: {:?}", config.upstream);
    println!("TLS: {:?}", config.tls);

    Ok(())
}
