use clap::Parser;

const DEFAULT_CHANNEL_CAPACITY: usize = 32;
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Parser, Debug, Clone)]
#[command(name = "inventory_tracker", about = "Interactive in-memory inventory tracker")]
pub struct CliArgs {
    /// Size of the inventory service mailbox
    #[arg(long, env = "INVENTORY_CHANNEL_CAPACITY", value_name = "N")]
    pub channel_capacity: Option<usize>,

    /// Seed a few sample products at startup
    #[arg(long, env = "INVENTORY_SAMPLE_DATA")]
    pub sample_data: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "INVENTORY_LOG", value_name = "FILTER")]
    pub log: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub channel_capacity: usize,
    pub sample_data: bool,
    pub log_filter: String,
}

impl AppConfig {
    pub fn from_args(args: CliArgs) -> Self {
        let CliArgs {
            channel_capacity,
            sample_data,
            log,
        } = args;

        Self {
            // tokio panics on a zero-capacity channel
            channel_capacity: channel_capacity
                .filter(|capacity| *capacity > 0)
                .unwrap_or(DEFAULT_CHANNEL_CAPACITY),
            sample_data,
            log_filter: log.unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            sample_data: false,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}
