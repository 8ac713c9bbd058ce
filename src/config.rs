//! Runtime configuration, read from flags or `RELAYQ_*` environment variables.

use std::net::SocketAddr;

use clap::{Parser, ValueEnum};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Parser)]
#[command(name = "relayq", version, about = "In-memory FIFO message queue over HTTP")]
pub struct Config {
    /// Interface to listen on
    #[arg(long, env = "RELAYQ_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "RELAYQ_PORT", default_value_t = 5001)]
    pub port: u16,

    /// Log output format
    #[arg(long, env = "RELAYQ_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| Error::InvalidAddress(addr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_5001() {
        let config = Config::try_parse_from(["relayq"]).unwrap();
        assert_eq!(config.port, 5001);
        assert_eq!(config.listen_addr().unwrap().to_string(), "0.0.0.0:5001");
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn flags_override_defaults() {
        let config =
            Config::try_parse_from(["relayq", "--host", "127.0.0.1", "-p", "8080", "--log-format", "json"])
                .unwrap();
        assert_eq!(config.listen_addr().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn hostname_is_not_a_socket_addr() {
        let config = Config {
            host: "not a host".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.listen_addr(), Err(Error::InvalidAddress(_))));
    }
}
