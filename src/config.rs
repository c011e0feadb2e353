use anyhow::Result;
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub submit: SubmitConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitConfig {
    pub default_assembly: String,
    pub assemblies: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig {
                base_url: env::var("CONSOLE_SERVER_URL")
                    .unwrap_or_else(|_| "http://localhost:8060".to_string()),
            },
            submit: SubmitConfig {
                default_assembly: env::var("CONSOLE_DEFAULT_ASSEMBLY")
                    .unwrap_or_else(|_| "hg38".to_string()),
                assemblies: env::var("CONSOLE_ASSEMBLIES")
                    .unwrap_or_else(|_| "hg38,hg19,mm10".to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            },
        })
    }
}
