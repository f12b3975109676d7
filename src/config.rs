use crate::{RestBlockError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// 传输层配置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// 是否校验 TLS 证书
    pub verify_ssl: bool,
    /// 请求超时（秒）
    pub timeout_secs: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            verify_ssl: true,
            timeout_secs: 30,
        }
    }
}

/// 响应 JSON 美化配置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct JsonSettings {
    /// 非 ASCII 字符输出为 \uXXXX
    pub escape_non_ascii: bool,
    pub indent_width: usize,
    /// JSON 响应对应的显示语法
    pub syntax: String,
}

impl Default for JsonSettings {
    fn default() -> Self {
        Self {
            escape_non_ascii: true,
            indent_width: 2,
            syntax: "json".to_string(),
        }
    }
}

/// 完整配置，每次调用时显式传入
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub http: HttpSettings,
    pub json: JsonSettings,
}

/// 配置文件加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 配置文件名
    const CONFIG_FILE: &'static str = "restblock.toml";

    /// 从指定路径加载配置文件
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Settings> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RestBlockError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Settings> {
        toml::from_str(content)
            .map_err(|e| RestBlockError::ConfigError(format!("Failed to parse config file: {}", e)))
    }

    /// 查找并加载配置文件
    /// 查找顺序：
    /// 1. 当前目录及其父目录
    /// 2. 用户配置目录 ~/.config/restblock/
    pub fn find_and_load() -> Option<Settings> {
        Self::try_load_from_current_dir().or_else(Self::try_load_from_user_dir)
    }

    fn try_load_from_current_dir() -> Option<Settings> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let config_path = current.join(Self::CONFIG_FILE);
            if config_path.exists() {
                return Self::load_logged(&config_path);
            }

            // 尝试父目录
            if !current.pop() {
                break;
            }
        }

        None
    }

    fn try_load_from_user_dir() -> Option<Settings> {
        let home = dirs::home_dir()?;
        let config_path = home
            .join(".config")
            .join("restblock")
            .join(Self::CONFIG_FILE);

        if config_path.exists() {
            Self::load_logged(&config_path)
        } else {
            None
        }
    }

    fn load_logged(path: &Path) -> Option<Settings> {
        match Self::load_from_path(path) {
            Ok(settings) => {
                tracing::debug!(path = %path.display(), "config loaded");
                Some(settings)
            }
            Err(e) => {
                tracing::warn!("{}", e);
                None
            }
        }
    }
}
