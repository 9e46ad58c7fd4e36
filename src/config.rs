//! Configuration for the sampler.
//!
//! All runtime behaviour is controlled through [`SamplerConfig`], built via
//! its [`SamplerConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share the config between the orchestrator and the scheduler
//! and to diff two runs to understand why their outputs differ.
//!
//! The fragment-selection thresholds (window size, attempt count, length
//! limits) are deliberately NOT configurable; they are the heuristic, and
//! live as constants next to the code that uses them.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use edgequake_llm::LLMProvider;

use crate::error::CommonplaceError;

/// Model used when neither the config nor the environment names one.
///
/// An instant-tier model: quote extraction is a short, cheap call and runs
/// unattended several times a day.
pub const DEFAULT_MODEL: &str = "gpt-4.1-nano";

/// Configuration for sampling runs and the scheduler.
///
/// Built via [`SamplerConfig::builder()`] or [`SamplerConfig::default()`].
///
/// # Example
/// ```rust
/// use commonplace::SamplerConfig;
///
/// let config = SamplerConfig::builder()
///     .books_dir("~/books")
///     .interval_minutes(60)
///     .model("gpt-4.1-nano")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct SamplerConfig {
    /// Directory scanned (non-recursively) for `.pdf` files. Default: `.`.
    pub books_dir: PathBuf,

    /// Directory receiving the per-day `YYYY-MM-DD.md` log files. Default: `logs`.
    pub logs_dir: PathBuf,

    /// Minutes between scheduled runs. Default: 180.
    ///
    /// The first run fires immediately at startup; this only controls the
    /// spacing of the ticks after it.
    pub interval_minutes: u64,

    /// Model identifier, e.g. "gpt-4.1-nano". If None, uses [`DEFAULT_MODEL`]
    /// or whatever the auto-detected provider defaults to.
    pub model: Option<String>,

    /// LLM provider name (e.g. "openai", "anthropic", "ollama").
    /// If None along with `provider`, uses `ProviderFactory::from_env()`.
    pub provider_name: Option<String>,

    /// Pre-constructed LLM provider. Takes precedence over `provider_name`.
    pub provider: Option<Arc<dyn LLMProvider>>,

    /// Sampling temperature for the extraction call. Default: 0.7.
    ///
    /// Creative but bounded: the reflection should vary between runs
    /// without drifting into nonsense.
    pub temperature: f32,

    /// Model attempts per run before giving up on the day. Default: 6.
    ///
    /// Skip and malformed replies each consume one attempt; the same
    /// fragment is re-sent every time.
    pub max_model_attempts: u32,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            books_dir: PathBuf::from("."),
            logs_dir: PathBuf::from("logs"),
            interval_minutes: 180,
            model: None,
            provider_name: None,
            provider: None,
            temperature: 0.7,
            max_model_attempts: 6,
        }
    }
}

impl fmt::Debug for SamplerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SamplerConfig")
            .field("books_dir", &self.books_dir)
            .field("logs_dir", &self.logs_dir)
            .field("interval_minutes", &self.interval_minutes)
            .field("model", &self.model)
            .field("provider_name", &self.provider_name)
            .field("provider", &self.provider.as_ref().map(|_| "<dyn LLMProvider>"))
            .field("temperature", &self.temperature)
            .field("max_model_attempts", &self.max_model_attempts)
            .finish()
    }
}

impl SamplerConfig {
    /// Create a new builder for `SamplerConfig`.
    pub fn builder() -> SamplerConfigBuilder {
        SamplerConfigBuilder {
            config: Self::default(),
        }
    }

    /// The tick interval as a [`Duration`].
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_minutes * 60)
    }
}

/// Builder for [`SamplerConfig`].
#[derive(Debug)]
pub struct SamplerConfigBuilder {
    config: SamplerConfig,
}

impl SamplerConfigBuilder {
    pub fn books_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.books_dir = dir.into();
        self
    }

    pub fn logs_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.logs_dir = dir.into();
        self
    }

    pub fn interval_minutes(mut self, minutes: u64) -> Self {
        self.config.interval_minutes = minutes;
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = Some(model.into());
        self
    }

    pub fn provider_name(mut self, name: impl Into<String>) -> Self {
        self.config.provider_name = Some(name.into());
        self
    }

    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.config.provider = Some(provider);
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn max_model_attempts(mut self, n: u32) -> Self {
        self.config.max_model_attempts = n.max(1);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<SamplerConfig, CommonplaceError> {
        let c = &self.config;
        if c.interval_minutes == 0 {
            return Err(CommonplaceError::InvalidConfig(
                "Interval must be at least 1 minute".into(),
            ));
        }
        if c.max_model_attempts == 0 {
            return Err(CommonplaceError::InvalidConfig(
                "Model attempt budget must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}
