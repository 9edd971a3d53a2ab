use std::time::Duration;

use clap::{Args as ClapArgs, Parser, ValueEnum};
use ingredai_core::domain::{
    common::{
        AnalysisConfig, DEFAULT_LLM_MODEL, DEFAULT_OPENROUTER_BASE_URL, IngredaiConfig, LLMConfig,
        OcrConfig,
    },
    ingredient_analysis::value_objects::{AnalysisMode, SeverityPolicy},
    ocr::value_objects::OcrBackend,
};
use redact::Secret;

#[derive(Debug, Clone, Parser)]
#[command(name = "ingredai", about = "IngrediAI ingredient reasoning backend")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub log: LogArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub analysis: AnalysisArgs,

    #[command(flatten)]
    pub ocr: OcrArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "PORT", default_value_t = 8000)]
    pub port: u16,

    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    /// Origins allowed by CORS; empty or `*` allows any origin.
    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        num_args = 0..
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "RUST_LOG", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LlmArgs {
    #[arg(
        long = "openrouter-api-key",
        env = "OPENROUTER_API_KEY",
        hide_env_values = true,
        value_parser = parse_secret
    )]
    pub api_key: Secret<String>,

    #[arg(
        long = "openrouter-base-url",
        env = "OPENROUTER_BASE_URL",
        default_value = DEFAULT_OPENROUTER_BASE_URL
    )]
    pub base_url: String,

    #[arg(long = "llm-model", env = "LLM_MODEL", default_value = DEFAULT_LLM_MODEL)]
    pub model: String,

    #[arg(long = "llm-temperature", env = "LLM_TEMPERATURE", default_value_t = 0.7)]
    pub temperature: f32,

    #[arg(long = "llm-timeout-secs", env = "LLM_TIMEOUT_SECS", default_value_t = 20)]
    pub timeout_secs: u64,

    #[arg(
        long = "openrouter-referer",
        env = "OPENROUTER_REFERER",
        default_value = "http://localhost:8000"
    )]
    pub referer: String,

    #[arg(
        long = "openrouter-app-title",
        env = "OPENROUTER_APP_TITLE",
        default_value = "IngrediAI"
    )]
    pub app_title: String,
}

fn parse_secret(value: &str) -> Result<Secret<String>, String> {
    Ok(Secret::new(value.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AnalysisModeArg {
    Batch,
    PerIngredient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeverityPolicyArg {
    /// Trust the model's severity tag.
    Model,
    /// Infer severity from the ingredient name.
    Keyword,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct AnalysisArgs {
    #[arg(long = "analysis-mode", env = "ANALYSIS_MODE", value_enum, default_value_t = AnalysisModeArg::Batch)]
    pub mode: AnalysisModeArg,

    #[arg(long = "severity-policy", env = "SEVERITY_POLICY", value_enum, default_value_t = SeverityPolicyArg::Model)]
    pub severity_policy: SeverityPolicyArg,

    #[arg(long = "analysis-deadline-secs", env = "ANALYSIS_DEADLINE_SECS", default_value_t = 30)]
    pub deadline_secs: u64,

    #[arg(
        long = "per-ingredient-concurrency",
        env = "PER_INGREDIENT_CONCURRENCY",
        default_value_t = 3
    )]
    pub per_ingredient_concurrency: usize,

    #[arg(
        long = "strict-json-retry",
        env = "STRICT_JSON_RETRY",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub strict_json_retry: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OcrBackendArg {
    Tesseract,
    Vision,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct OcrArgs {
    #[arg(long = "ocr-backend", env = "OCR_BACKEND", value_enum, default_value_t = OcrBackendArg::Tesseract)]
    pub backend: OcrBackendArg,

    #[arg(long = "tesseract-path", env = "TESSERACT_PATH", default_value = "tesseract")]
    pub tesseract_path: String,

    #[arg(long = "ocr-language", env = "OCR_LANGUAGE", default_value = "eng")]
    pub language: String,

    #[arg(long = "ocr-vision-model", env = "OCR_VISION_MODEL", default_value = DEFAULT_LLM_MODEL)]
    pub vision_model: String,

    #[arg(long = "ocr-max-image-bytes", env = "OCR_MAX_IMAGE_BYTES", default_value_t = 10 * 1024 * 1024)]
    pub max_image_bytes: usize,
}

impl From<AnalysisModeArg> for AnalysisMode {
    fn from(value: AnalysisModeArg) -> Self {
        match value {
            AnalysisModeArg::Batch => AnalysisMode::Batch,
            AnalysisModeArg::PerIngredient => AnalysisMode::PerIngredient,
        }
    }
}

impl From<SeverityPolicyArg> for SeverityPolicy {
    fn from(value: SeverityPolicyArg) -> Self {
        match value {
            SeverityPolicyArg::Model => SeverityPolicy::ModelTag,
            SeverityPolicyArg::Keyword => SeverityPolicy::KeywordLexicon,
        }
    }
}

impl From<OcrBackendArg> for OcrBackend {
    fn from(value: OcrBackendArg) -> Self {
        match value {
            OcrBackendArg::Tesseract => OcrBackend::Tesseract,
            OcrBackendArg::Vision => OcrBackend::Vision,
        }
    }
}

impl From<Args> for IngredaiConfig {
    fn from(args: Args) -> Self {
        IngredaiConfig {
            llm: LLMConfig {
                api_key: args.llm.api_key,
                base_url: args.llm.base_url,
                model: args.llm.model,
                temperature: args.llm.temperature,
                timeout: Duration::from_secs(args.llm.timeout_secs),
                referer: args.llm.referer,
                app_title: args.llm.app_title,
            },
            analysis: AnalysisConfig {
                mode: args.analysis.mode.into(),
                severity_policy: args.analysis.severity_policy.into(),
                request_deadline: Duration::from_secs(args.analysis.deadline_secs),
                per_ingredient_concurrency: args.analysis.per_ingredient_concurrency,
                strict_json_retry: args.analysis.strict_json_retry,
            },
            ocr: OcrConfig {
                backend: args.ocr.backend.into(),
                tesseract_path: args.ocr.tesseract_path,
                language: args.ocr.language,
                vision_model: args.ocr.vision_model,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec!["ingredai", "--openrouter-api-key", "sk-or-secret"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_explicit_flags_override_defaults() {
        let args = parse(&[
            "--server-port",
            "9100",
            "--analysis-mode",
            "per-ingredient",
            "--severity-policy",
            "keyword",
            "--strict-json-retry",
            "false",
            "--allowed-origins",
            "http://a.test,http://b.test",
        ]);

        assert_eq!(args.server.port, 9100);
        assert_eq!(args.analysis.mode, AnalysisModeArg::PerIngredient);
        assert_eq!(args.analysis.severity_policy, SeverityPolicyArg::Keyword);
        assert!(!args.analysis.strict_json_retry);
        assert_eq!(
            args.server.allowed_origins,
            vec!["http://a.test", "http://b.test"]
        );
    }

    #[test]
    fn test_args_convert_to_core_config() {
        let config = IngredaiConfig::from(parse(&[
            "--llm-temperature",
            "0.2",
            "--ocr-backend",
            "vision",
            "--severity-policy",
            "keyword",
        ]));

        assert_eq!(config.llm.api_key.expose_secret(), "sk-or-secret");
        assert_eq!(config.llm.temperature, 0.2);
        assert_eq!(config.ocr.backend, OcrBackend::Vision);
        assert_eq!(config.analysis.severity_policy, SeverityPolicy::KeywordLexicon);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_mode_is_rejected() {
        let result = Args::try_parse_from([
            "ingredai",
            "--openrouter-api-key",
            "k",
            "--analysis-mode",
            "streaming",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let rendered = format!("{:?}", parse(&[]));
        assert!(!rendered.contains("sk-or-secret"));
        assert!(rendered.contains("[REDACTED"));
    }
}
