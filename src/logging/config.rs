use std::{env, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Переменная окружения с директивой уровня логирования.
pub const ENV_LOG_LEVEL: &str = "PUSU_LOG_LEVEL";
/// Переменная окружения с форматом вывода.
pub const ENV_LOG_FORMAT: &str = "PUSU_LOG_FORMAT";

/// Формат вывода fmt-слоя.
#[derive(Debug, Default, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let s = match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        };
        f.write_str(s)
    }
}

/// Конфигурация глобального `tracing`-подписчика.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Директива `EnvFilter`: уровень ("info") или список ("pusu=debug,warn").
    pub level: String,
    pub format: LogFormat,
    /// ANSI-цвета (для json всегда выключены).
    pub with_ansi: bool,
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            with_ansi: true,
            with_target: true,
        }
    }
}

impl LoggingConfig {
    /// Перекрывает уровень и формат значениями `PUSU_LOG_LEVEL` и
    /// `PUSU_LOG_FORMAT`. Некорректный формат игнорируется.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var(ENV_LOG_LEVEL) {
            if !level.trim().is_empty() {
                self.level = level.trim().to_string();
            }
        }
        if let Some(format) = env::var(ENV_LOG_FORMAT)
            .ok()
            .and_then(|f| f.parse().ok())
        {
            self.format = format;
        }
    }

    /// Директива для `EnvFilter`.
    pub fn build_filter_directive(&self) -> String {
        self.level.clone()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serial_test::serial;

    use super::*;

    #[rstest]
    #[case("compact", LogFormat::Compact)]
    #[case("PRETTY", LogFormat::Pretty)]
    #[case(" json ", LogFormat::Json)]
    fn test_log_format_parse(
        #[case] input: &str,
        #[case] expected: LogFormat,
    ) {
        assert_eq!(input.parse::<LogFormat>().unwrap(), expected);
    }

    #[test]
    fn test_log_format_parse_unknown() {
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_defaults() {
        let cfg = LoggingConfig::default();
        assert_eq!(cfg.build_filter_directive(), "info");
        assert_eq!(cfg.format, LogFormat::Compact);
        assert!(cfg.with_ansi);
    }

    /// Тест проверяет перекрытие конфигурации переменными окружения.
    #[test]
    #[serial]
    fn test_apply_env_overrides() {
        env::set_var(ENV_LOG_LEVEL, "pusu=debug");
        env::set_var(ENV_LOG_FORMAT, "json");

        let mut cfg = LoggingConfig::default();
        cfg.apply_env_overrides();

        env::remove_var(ENV_LOG_LEVEL);
        env::remove_var(ENV_LOG_FORMAT);

        assert_eq!(cfg.level, "pusu=debug");
        assert_eq!(cfg.format, LogFormat::Json);
    }

    /// Тест проверяет, что неизвестный формат не меняет конфигурацию.
    #[test]
    #[serial]
    fn test_apply_env_overrides_ignores_bad_format() {
        env::remove_var(ENV_LOG_LEVEL);
        env::set_var(ENV_LOG_FORMAT, "xml");

        let mut cfg = LoggingConfig::default();
        cfg.apply_env_overrides();

        env::remove_var(ENV_LOG_FORMAT);

        assert_eq!(cfg, LoggingConfig::default());
    }
}
