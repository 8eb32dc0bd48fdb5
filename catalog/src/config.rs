use std::path::PathBuf;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_API_SPEC_PATH: &str = "./api.yaml";

/// Server settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// OpenAPI document served on `/api.yaml`.
    pub api_spec_path: PathBuf,
}

impl Config {
    /// Reads `HOST`, `PORT` and `API_SPEC_PATH`, falling back to the defaults
    /// for anything unset or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .and_then(|port| port.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Config {
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            port,
            api_spec_path: lookup("API_SPEC_PATH")
                .unwrap_or_else(|| DEFAULT_API_SPEC_PATH.to_owned())
                .into(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!("0.0.0.0", config.host);
        assert_eq!(8080, config.port);
        assert_eq!(PathBuf::from("./api.yaml"), config.api_spec_path);
    }

    #[test]
    fn overrides_from_lookup() {
        let vars = HashMap::from([
            ("HOST", "127.0.0.1"),
            ("PORT", "9090"),
            ("API_SPEC_PATH", "/srv/api.yaml"),
        ]);
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!("127.0.0.1", config.host);
        assert_eq!(9090, config.port);
        assert_eq!(PathBuf::from("/srv/api.yaml"), config.api_spec_path);
    }

    #[test]
    fn bad_port_falls_back() {
        let config = Config::from_lookup(|key| (key == "PORT").then(|| "http".to_owned()));
        assert_eq!(8080, config.port);
    }
}
