use thiserror::Error;

pub type CobbleResult<T> = Result<T, CobbleError>;

#[derive(Error, Debug)]
pub enum CobbleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("WalkDir error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version error: {0}")]
    Version(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Archive error: {0}")]
    Archive(String),

    #[error("Package error: {0}")]
    Package(String),

    #[error("Deployment error: {0}")]
    Deploy(String),

    /// The deployment tool could not be located on this machine.
    #[error("Deployment tool not found: {0}")]
    ToolNotFound(String),

    /// `devices` did not list the configured device address.
    #[error("Device not connected: {0}")]
    DeviceNotConnected(String),

    /// A workflow step was attempted out of order.
    #[error("Workflow error: {0}")]
    Workflow(String),
}
