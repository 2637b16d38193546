use clap::Args;
use std::path::PathBuf;

/// File name used when no config path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.ini";

#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Path to the INI file holding the saved model configuration
    #[arg(short = 'c', long, value_name = "PATH", env = "MODEL_CHAT_CONFIG")]
    pub config: Option<PathBuf>,
    /// Directory for log files
    #[arg(long, value_name = "DIR", env = "MODEL_CHAT_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

impl CommonArgs {
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    pub fn log_dir(&self) -> PathBuf {
        if let Some(dir) = &self.log_dir {
            return dir.clone();
        }

        dirs::data_local_dir()
            .map(|dir| dir.join("model-chat").join("logs"))
            .unwrap_or_else(|| PathBuf::from("logs"))
    }
}
