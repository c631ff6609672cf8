use clap::Args;

/// Connection settings for the InfluxDB v2 write API.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct InfluxConfig {
    /// InfluxDB base URL
    #[arg(long = "influx-url", env = "INFLUXDB_URL", default_value = "http://localhost:8086")]
    pub url: String,

    /// API token sent as `Authorization: Token <token>`
    #[arg(long = "influx-token", env = "INFLUXDB_TOKEN", default_value = "my-token", hide_env_values = true)]
    pub token: String,

    /// Organization the bucket belongs to
    #[arg(long = "influx-org", env = "INFLUXDB_ORG", default_value = "my-org")]
    pub org: String,

    /// Target bucket
    #[arg(long = "influx-bucket", env = "INFLUXDB_BUCKET", default_value = "my-bucket")]
    pub bucket: String,
}

impl Default for InfluxConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8086".to_string(),
            token: "my-token".to_string(),
            org: "my-org".to_string(),
            bucket: "my-bucket".to_string(),
        }
    }
}

/// Settings for the write proxy.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    /// Bind address
    #[arg(long, env = "PROXY_BIND", default_value = "0.0.0.0")]
    pub bind: String,

    /// HTTP port
    #[arg(short, long, env = "PROXY_PORT", default_value = "8000")]
    pub port: u16,

    #[command(flatten)]
    pub influx: InfluxConfig,
}

impl ProxyConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8000,
            influx: InfluxConfig::default(),
        }
    }
}
