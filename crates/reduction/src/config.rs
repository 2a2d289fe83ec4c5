// config.rs
// 归约器全局配置结构体及其默认实现，包含顺序阈值和默认并行度。
use crate::types::DEFAULT_SEQ_THRESHOLD;
use serde::{Deserialize, Serialize};

/// 归约器全局配置，控制顺序阈值和默认并行度
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReductionConfig {
    /// 顺序阈值：区间元素数低于该值时直接顺序归约
    /// 只影响性能和递归树形状，不影响正确性
    pub seq_threshold: usize,
    /// 默认并行度（工作线程数上限）
    pub default_parallelism: usize,
}

impl Default for ReductionConfig {
    /// 默认配置：阈值为500000，并行度为本机逻辑核心数
    fn default() -> Self {
        Self {
            seq_threshold: DEFAULT_SEQ_THRESHOLD,
            default_parallelism: num_cpus::get(),
        }
    }
}

/// 用于直接反序列化配置文件 reduction.json 的结构体
/// 使用 serde 属性来处理字段名不匹配的问题 (e.g., "sequential_cutoff" -> seq_threshold)
#[derive(Debug, Deserialize)]
pub(crate) struct ReductionConfigJson {
    #[serde(rename = "sequential_cutoff")]
    seq_threshold: usize,
    #[serde(rename = "num_workers")]
    default_parallelism: usize,
}

// 为 ReductionConfigJson 实现一个转换方法，使其可以轻松地转为 ReductionConfig
impl From<ReductionConfigJson> for ReductionConfig {
    fn from(config_json: ReductionConfigJson) -> Self {
        Self {
            seq_threshold: config_json.seq_threshold,
            default_parallelism: config_json.default_parallelism,
        }
    }
}
