use tracing_subscriber::{
    fmt::{self, MakeWriter},
    layer::Layer as LayerTrait,
    registry::LookupSpan,
};

use crate::logging::config::{LogFormat, LoggingConfig};

/// Собирает fmt-слой в формате из конфигурации.
/// Возвращаем boxed trait-объект, чтобы стереть конкретный тип формата
/// (json/pretty/compact).
pub fn build_formatter_from_config<S, W>(
    config: &LoggingConfig,
    writer: W,
) -> Box<dyn LayerTrait<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a> + 'static,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    match config.format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(config.with_target);
            Box::new(layer)
        }
        LogFormat::Pretty => {
            let layer = fmt::layer()
                .pretty()
                .with_writer(writer)
                .with_ansi(config.with_ansi)
                .with_target(config.with_target);
            Box::new(layer)
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_writer(writer)
                .with_ansi(config.with_ansi)
                .with_target(config.with_target);
            Box::new(layer)
        }
    }
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::{prelude::*, registry::Registry};

    use super::*;
    use crate::test_util::VecMakeWriter;

    fn capture(format: LogFormat) -> String {
        let writer = VecMakeWriter::default();
        let cfg = LoggingConfig {
            format,
            with_ansi: false,
            ..Default::default()
        };
        let layer = build_formatter_from_config::<Registry, _>(&cfg, writer.clone());
        let subscriber = Registry::default().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: "pusu", publication = "orders", "formatted");
        });

        writer.contents()
    }

    /// Тест проверяет, что json-формат выдаёт валидный JSON на строку.
    #[test]
    fn test_json_format_is_valid_json() {
        let out = capture(LogFormat::Json);
        let line = out.lines().next().expect("no output");
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["target"], "pusu");
        assert_eq!(value["fields"]["publication"], "orders");
    }

    /// Тест проверяет, что текстовые форматы содержат сообщение и поля.
    #[test]
    fn test_text_formats_contain_fields() {
        for format in [LogFormat::Compact, LogFormat::Pretty] {
            let out = capture(format);
            assert!(out.contains("formatted"), "{format}: {out}");
            assert!(out.contains("orders"), "{format}: {out}");
        }
    }
}
