use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "PINHOLE_LISTEN_ADDR";
pub const BASE_URL_ENV: &str = "PINHOLE_BASE_URL";
pub const STORAGE_BACKEND_ENV: &str = "PINHOLE_STORAGE_BACKEND";
pub const GENERATOR_ENV: &str = "PINHOLE_GENERATOR";
pub const GENERATOR_PREFIX_ENV: &str = "PINHOLE_GENERATOR_PREFIX";
pub const CODE_LENGTH_ENV: &str = "PINHOLE_CODE_LENGTH";
pub const DEFAULT_TTL_ENV: &str = "PINHOLE_DEFAULT_TTL_MINUTES";
pub const MAX_BATCH_ENV: &str = "PINHOLE_MAX_BATCH";
pub const LOG_FORMAT_ENV: &str = "PINHOLE_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_GENERATOR_PREFIX: &str = "ph";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "locked")]
    Locked,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Locked => write!(f, "locked"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GeneratorArg {
    Random,
    Seq,
}

impl Display for GeneratorArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GeneratorArg::Random => write!(f, "random"),
            GeneratorArg::Seq => write!(f, "seq"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "pinhole")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Public prefix that short URLs are rendered under.
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::Locked
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = GENERATOR_ENV, value_enum, default_value_t = GeneratorArg::Random)]
    pub generator: GeneratorArg,

    /// Prefix for the `seq` generator.
    #[arg(
        long,
        env = GENERATOR_PREFIX_ENV,
        default_value = DEFAULT_GENERATOR_PREFIX,
    )]
    pub generator_prefix: String,

    /// Length of codes from the `random` generator.
    #[arg(long, env = CODE_LENGTH_ENV, default_value_t = pinhole_generator::random::DEFAULT_LENGTH)]
    pub code_length: usize,

    #[arg(long, env = DEFAULT_TTL_ENV, default_value_t = pinhole_core::Ttl::DEFAULT.minutes())]
    pub default_ttl_minutes: u32,

    #[arg(long, env = MAX_BATCH_ENV, default_value_t = pinhole_shortener::DEFAULT_MAX_BATCH)]
    pub max_batch: usize,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormatArg::Text)]
    pub log_format: LogFormatArg,
}
