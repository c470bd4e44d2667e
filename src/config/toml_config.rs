use crate::core::ConfigProvider;
use crate::domain::model::{MissingSourcePolicy, Selection, SizeThreshold};
use crate::utils::error::{Result, ShelfError};
use crate::utils::validation::{
    validate_distinct_dirs, validate_non_empty_string, validate_path, validate_required_field,
    validate_threshold, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShelfPlan {
    pub plan: PlanInfo,
    pub jobs: Vec<JobConfig>,
    pub logging: Option<LoggingConfig>,
    pub error_handling: Option<ErrorHandlingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanInfo {
    pub name: String,
    pub description: Option<String>,
    pub execution_order: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub name: String,
    pub description: Option<String>,
    pub source: Option<String>,
    pub destination: Option<String>,
    #[serde(default)]
    pub selection: Selection,
    pub threshold_mb: Option<f64>,
    #[serde(default)]
    pub on_missing_source: MissingSourcePolicy,
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<LogFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorHandlingConfig {
    pub on_job_failure: Option<OnJobFailure>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnJobFailure {
    #[default]
    Stop,
    Continue,
}

impl ShelfPlan {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ShelfError::io("reading", path, e))?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ShelfError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MODELS_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ShelfError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("plan.name", &self.plan.name)?;

        if self.jobs.is_empty() {
            return Err(ShelfError::ConfigValidationError {
                field: "jobs".to_string(),
                message: "Plan defines no jobs".to_string(),
            });
        }

        let mut names = HashSet::new();
        for job in &self.jobs {
            if !names.insert(job.name.as_str()) {
                return Err(ShelfError::ConfigValidationError {
                    field: "jobs.name".to_string(),
                    message: format!("Duplicate job name '{}'", job.name),
                });
            }
            job.validate()?;
        }

        if let Some(order) = &self.plan.execution_order {
            for name in order {
                if !names.contains(name.as_str()) {
                    return Err(ShelfError::ConfigValidationError {
                        field: "plan.execution_order".to_string(),
                        message: format!("Job '{}' in execution order is not defined", name),
                    });
                }
            }
        }

        if let Some(level) = self.logging.as_ref().and_then(|l| l.level.as_deref()) {
            let valid_levels = ["trace", "debug", "info", "warn", "error"];
            if !valid_levels.contains(&level) {
                return Err(ShelfError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.to_string(),
                    reason: format!("Valid levels: {}", valid_levels.join(", ")),
                });
            }
        }

        Ok(())
    }

    pub fn get_job(&self, name: &str) -> Option<&JobConfig> {
        self.jobs.iter().find(|j| j.name == name)
    }

    /// 取得啟用的 job（依 execution_order，未指定時依檔案順序）
    pub fn enabled_jobs(&self) -> Vec<&JobConfig> {
        let ordered: Vec<&JobConfig> = match &self.plan.execution_order {
            Some(order) => order.iter().filter_map(|name| self.get_job(name)).collect(),
            None => self.jobs.iter().collect(),
        };

        ordered.into_iter().filter(|job| job.is_enabled()).collect()
    }

    pub fn on_job_failure(&self) -> OnJobFailure {
        self.error_handling
            .as_ref()
            .and_then(|e| e.on_job_failure)
            .unwrap_or_default()
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or("info")
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging
            .as_ref()
            .and_then(|l| l.format)
            .unwrap_or_default()
    }
}

impl JobConfig {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

impl ConfigProvider for JobConfig {
    fn source_dir(&self) -> &Path {
        Path::new(self.source.as_deref().unwrap_or_default())
    }

    fn destination_dir(&self) -> &Path {
        Path::new(self.destination.as_deref().unwrap_or_default())
    }

    fn threshold(&self) -> SizeThreshold {
        SizeThreshold::from_megabytes(self.threshold_mb.unwrap_or(SizeThreshold::DEFAULT_MB))
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    fn missing_source(&self) -> MissingSourcePolicy {
        self.on_missing_source
    }
}

impl Validate for JobConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("jobs.name", &self.name)?;

        let source = validate_required_field(&format!("jobs.{}.source", self.name), &self.source)?;
        let destination = validate_required_field(
            &format!("jobs.{}.destination", self.name),
            &self.destination,
        )?;

        validate_path(&format!("jobs.{}.source", self.name), Path::new(source))?;
        validate_path(
            &format!("jobs.{}.destination", self.name),
            Path::new(destination),
        )?;

        if let Some(threshold) = self.threshold_mb {
            validate_threshold(&format!("jobs.{}.threshold_mb", self.name), threshold)?;
        }

        validate_distinct_dirs(Path::new(source), Path::new(destination))
    }
}

impl Validate for ShelfPlan {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
