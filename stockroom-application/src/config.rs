//! 配置加载
//!
//! 分层来源，后者覆盖前者：
//! 1. 内置默认值
//! 2. `config/stockroom.toml`（可选）
//! 3. 环境变量 `STOCKROOM__*`，如 `STOCKROOM__REMOTE__URL`、`STOCKROOM__ID_STRATEGY`
//!
use crate::error::{AppError, AppResult};
use bon::Builder;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use stockroom_domain::mutation::IdStrategy;
use stockroom_domain::persist::RemoteConfig;
use tracing::info;

pub const CONFIG_FILE: &str = "config/stockroom";
pub const ENV_PREFIX: &str = "STOCKROOM";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Builder, Debug, Clone, Deserialize)]
pub struct StockroomConfig {
    #[builder(default = String::from("info"), into)]
    pub log_level: String,
    /// 以 JSON 行输出日志
    #[builder(default)]
    pub log_json: bool,
    #[builder(default)]
    pub id_strategy: IdStrategy,
    /// 提交前按结构描述校验表单；关闭时只做强制转换
    #[builder(default)]
    pub strict_forms: bool,
    /// 商品表的远端地址；缺省时商品使用空的内存仓储
    pub remote: Option<RemoteConfig>,
}

impl Default for StockroomConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl StockroomConfig {
    /// 默认文件 + 环境变量
    pub fn load() -> AppResult<Self> {
        Self::load_from(CONFIG_FILE)
    }

    pub fn load_from(path: &str) -> AppResult<Self> {
        let builder = defaults()?
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));
        let config = finish(builder)?;
        info!(
            id_strategy = ?config.id_strategy,
            strict_forms = config.strict_forms,
            remote = config.remote.is_some(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// 仅从一段 TOML 文本加载（不读环境变量）
    pub fn from_toml(text: &str) -> AppResult<Self> {
        finish(defaults()?.add_source(File::from_str(text, FileFormat::Toml)))
    }

    pub fn validate(&self) -> AppResult<()> {
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(AppError::Validation(format!(
                "log_level must be one of {}, got {:?}",
                LOG_LEVELS.join(", "),
                self.log_level
            )));
        }
        if let Some(remote) = &self.remote {
            if remote.url.trim().is_empty() {
                return Err(AppError::Validation("remote.url is empty".into()));
            }
            if remote.api_key.trim().is_empty() {
                return Err(AppError::Validation("remote.api_key is empty".into()));
            }
        }
        Ok(())
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("log_level", "info")?
        .set_default("log_json", false)?
        .set_default("id_strategy", "monotonic")?
        .set_default("strict_forms", false)
}

fn finish(builder: ConfigBuilder<DefaultState>) -> AppResult<StockroomConfig> {
    let config: StockroomConfig = builder.build()?.try_deserialize()?;
    config.validate()?;
    Ok(config)
}
