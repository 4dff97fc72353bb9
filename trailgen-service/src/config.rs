use std::env;
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_GRAPH: &str = "graph.bin";
const DEFAULT_ADDR: &str = "127.0.0.1:5000";
const DEFAULT_SNAP_RADIUS_M: f64 = 500.0;

/// Service settings, read from `TRAILGEN_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
  pub graph_path: String,
  pub addr: SocketAddr,
  pub snap_radius_m: f64,
  pub time_limit: Option<Duration>,
}

impl Config {
  pub fn from_env() -> Result<Config, String> {
    Config::from_lookup(|key| env::var(key).ok())
  }

  fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Config, String> {
    let graph_path = lookup("TRAILGEN_GRAPH").unwrap_or_else(|| DEFAULT_GRAPH.to_string());

    let addr = lookup("TRAILGEN_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
    let addr = addr
      .parse::<SocketAddr>()
      .map_err(|e| format!("Invalid TRAILGEN_ADDR '{}': {}", addr, e))?;

    let snap_radius_m = match lookup("TRAILGEN_SNAP_RADIUS") {
      Some(s) => s
        .parse::<f64>()
        .ok()
        .filter(|r| r.is_finite() && *r > 0.0)
        .ok_or_else(|| format!("Invalid TRAILGEN_SNAP_RADIUS '{}'", s))?,
      None => DEFAULT_SNAP_RADIUS_M,
    };

    let time_limit = match lookup("TRAILGEN_TIME_LIMIT_MS") {
      Some(s) => Some(Duration::from_millis(
        s.parse::<u64>()
          .map_err(|e| format!("Invalid TRAILGEN_TIME_LIMIT_MS '{}': {}", s, e))?,
      )),
      None => None,
    };

    Ok(Config {
      graph_path,
      addr,
      snap_radius_m,
      time_limit,
    })
  }
}
