//! 宿主应用宏选项字符串的解析.
//!
//! 宿主应用以 `key=value` 对 (空白分隔) 的形式传递运行参数,
//! 例如 `"sigma=2.5 workers=4"`. 未出现的键取默认值.

use crate::consts::DEFAULT_SIGMA;
use crate::engine::cpus;
use crate::error::EngineError;

/// 在宏选项字符串中查找键 `key` 对应的值.
///
/// 选项为空白分隔的 `key=value` 对; 键不存在时返回 `default`.
/// 同名键出现多次时取第一次出现的值.
pub fn macro_value<'a>(options: &'a str, key: &str, default: &'a str) -> &'a str {
    options
        .split_whitespace()
        .find_map(|pair| {
            pair.split_once('=')
                .filter(|(k, _)| *k == key)
                .map(|(_, v)| v)
        })
        .unwrap_or(default)
}

/// 一次引擎运行的配置.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EngineOptions {
    /// 管状结构增强的尺度参数. 必须为正的有限实数.
    pub sigma: f64,

    /// 工作线程数. 必须为正.
    pub workers: usize,
}

impl Default for EngineOptions {
    #[inline]
    fn default() -> Self {
        Self {
            sigma: DEFAULT_SIGMA,
            workers: cpus().max(1),
        }
    }
}

impl EngineOptions {
    /// 从宏选项字符串解析配置.
    ///
    /// 支持的键: `sigma` (默认 [`DEFAULT_SIGMA`]), `workers`
    /// (默认为可并行核心数). 非法值在此处快速失败,
    /// 不会进入任何工作线程.
    pub fn from_macro_str(options: &str) -> Result<Self, EngineError> {
        let defaults = Self::default();

        let raw = macro_value(options, "sigma", "");
        let sigma = if raw.is_empty() {
            defaults.sigma
        } else {
            raw.parse::<f64>().map_err(|_| EngineError::InvalidOption {
                key: "sigma".into(),
                value: raw.into(),
            })?
        };
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(EngineError::InvalidSigma(sigma));
        }

        let raw = macro_value(options, "workers", "");
        let workers = if raw.is_empty() {
            defaults.workers
        } else {
            raw.parse::<usize>()
                .map_err(|_| EngineError::InvalidOption {
                    key: "workers".into(),
                    value: raw.into(),
                })?
        };
        if workers == 0 {
            return Err(EngineError::InvalidWorkerCount(workers));
        }

        Ok(Self { sigma, workers })
    }
}
