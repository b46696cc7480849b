//! 日志初始化
//!
//! `RUST_LOG` 优先；未设置时按配置的级别作用于本工作区的各个 crate。
//!
use tracing_subscriber::EnvFilter;

const CRATES: [&str; 3] = ["stockroom_domain", "stockroom_application", "demo"];

/// 由日志级别生成默认过滤指令
pub fn default_directives(level: &str) -> String {
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// 安装全局订阅者；重复调用时保留第一次的设置
pub fn init_tracing(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if let Err(err) = installed {
        tracing::debug!(error = %err, "tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_cover_every_crate() {
        assert_eq!(
            default_directives("debug"),
            "stockroom_domain=debug,stockroom_application=debug,demo=debug"
        );
    }

    #[test]
    fn init_is_idempotent() {
        init_tracing("info", false);
        init_tracing("debug", true);
    }
}
