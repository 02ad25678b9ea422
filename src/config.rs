use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub pear: PearConfig,
    pub agent: AgentConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub bind_addr: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PearConfig {
    pub api_url: String,
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
    pub client_id: String,
    pub slippage: f64,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AgentConfig {
    /// Demo mode: fill basket trades locally instead of calling Pear.
    pub paper_trading: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let server = ServerConfig {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
        };

        let pear = PearConfig {
            api_url: env::var("PEAR_API_URL")
                .unwrap_or_else(|_| "https://hl-v2.pearprotocol.io".to_string()),
            access_token: env::var("PEAR_ACCESS_TOKEN").ok().filter(|t| !t.is_empty()),
            client_id: env::var("PEAR_CLIENT_ID").unwrap_or_else(|_| "APITRADER".to_string()),
            slippage: env::var("PEAR_SLIPPAGE")
                .unwrap_or_else(|_| "0.01".to_string())
                .parse()
                .unwrap_or(0.01),
            timeout_secs: env::var("PEAR_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
        };

        let agent = AgentConfig {
            paper_trading: env::var("PAPER_TRADING")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),
        };

        if !(0.0..=1.0).contains(&pear.slippage) {
            anyhow::bail!("PEAR_SLIPPAGE must be between 0 and 1, got {}", pear.slippage);
        }

        Ok(Config {
            server,
            pear,
            agent,
        })
    }
}
