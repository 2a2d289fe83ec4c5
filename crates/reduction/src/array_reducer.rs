// array_reducer.rs
// 数组归约器，组合拆分器、叶子归约器与结果合并器，并提供对外入口函数。
use crate::config::{ReductionConfig, ReductionConfigJson};
use crate::error::{Error, Result};
use crate::leaf_reducer::LeafReducer;
use crate::pool_executor::PoolExecutor;
use crate::range_splitter::{RangeSplitter, SplitStrategy};
use crate::result_combiner::ResultCombiner;
use crate::task::{ReduceTask, TaskPriority};
use crate::types::DEFAULT_TWO_WAY_PARALLELISM;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// 数组归约器，负责把倒数和归约任务拆分、并行执行并合并结果
/// 配置：顺序阈值与默认并行度。
/// 拆分策略：二分或固定分块。
/// 叶子归约器：对叶子区间顺序求倒数和。
/// 结果合并器：自底向上合并部分结果。
#[derive(Debug)]
pub struct ArrayReducer {
    /// 归约配置
    pub config: ReductionConfig,
    /// 拆分策略
    pub strategy: SplitStrategy,
    /// 区间拆分器
    pub splitter: Arc<RangeSplitter>,
    /// 叶子归约器
    pub leaf_reducer: Arc<LeafReducer>,
    /// 结果合并器
    pub combiner: Arc<ResultCombiner>,
}

impl ArrayReducer {
    /// 创建新的数组归约器
    pub fn new(config: ReductionConfig, strategy: SplitStrategy) -> Self {
        let splitter = Arc::new(RangeSplitter::new(strategy.clone()));
        let leaf_reducer = Arc::new(LeafReducer::new());
        let combiner = Arc::new(ResultCombiner::new());

        Self {
            config,
            strategy,
            splitter,
            leaf_reducer,
            combiner,
        }
    }

    /// 从配置文件 reduction.json 读取阈值与并行度并初始化归约器
    /// 配置文件不存在或取值非法时返回错误
    pub fn new_from_config_file(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Err(Error::ConfigError(format!(
                "未找到配置文件 {}", config_path.display()
            )));
        }
        // 读取配置文件
        let mut file = File::open(config_path)
            .map_err(|e| Error::ConfigError(format!("打开配置文件失败: {}", e)))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| Error::ConfigError(format!("读取配置文件失败: {}", e)))?;
        // 解析 json
        let config_json: ReductionConfigJson = serde_json::from_str(&contents)
            .map_err(|e| Error::ConfigError(format!("解析配置文件失败: {}", e)))?;
        let config = ReductionConfig::from(config_json);
        // 校验取值
        if config.seq_threshold == 0 {
            return Err(Error::ConfigError("顺序阈值必须大于0".to_string()));
        }
        if config.default_parallelism == 0 {
            return Err(Error::ConfigError("并行度必须大于0".to_string()));
        }

        let strategy = SplitStrategy::Halving {
            seq_threshold: config.seq_threshold,
        };
        Ok(Self::new(config, strategy))
    }

    /// 将长度为 total 的输入拆分为叶子任务列表
    pub fn split_task(
        &self,
        total: usize,
        parent_task_id: &str,
        priority: TaskPriority,
    ) -> Result<Vec<ReduceTask>> {
        self.splitter.split_task(total, parent_task_id, priority)
    }

    /// 按配置的默认并行度归约
    pub fn reduce(&self, input: &[f64]) -> Result<f64> {
        self.reduce_with_parallelism(input, self.config.default_parallelism)
    }

    /// 按指定并行度归约，阻塞直到整棵任务树完成并返回标量结果
    /// 并行度非法时在创建任何任务之前快速失败
    pub fn reduce_with_parallelism(&self, input: &[f64], parallelism: usize) -> Result<f64> {
        let executor = PoolExecutor::new(parallelism)?;

        match &self.strategy {
            SplitStrategy::Halving { seq_threshold } => {
                executor.run_halving(input, *seq_threshold, &self.leaf_reducer, &self.combiner)
            }
            SplitStrategy::FixedChunk { .. } => {
                let root_task_id = format!("reduce_{}", Uuid::new_v4());
                let mut tasks =
                    self.split_task(input.len(), &root_task_id, TaskPriority::Normal)?;
                executor.execute_tasks(&mut tasks, input, &self.leaf_reducer)?;
                self.combiner.combine_tasks(&tasks)
            }
        }
    }
}

/// 顺序基线：从左到右计算整个输入的倒数和
pub fn sequential_sum(input: &[f64]) -> f64 {
    LeafReducer::new().reduce_full(input)
}

/// 二路入口：以并行度2归约，数值契约与 parallel_sum_with_tasks(input, 2) 相同
/// 前置条件：输入长度为偶数，违反时在创建任何任务之前返回无效参数错误
pub fn parallel_sum(input: &[f64]) -> Result<f64> {
    if input.len() % 2 != 0 {
        return Err(Error::InvalidArgument(format!(
            "二路入口要求输入长度为偶数，实际长度为 {}", input.len()
        )));
    }
    parallel_sum_with_tasks(input, DEFAULT_TWO_WAY_PARALLELISM)
}

/// 通用入口：按指定并行度归约，parallelism 必须不小于1
pub fn parallel_sum_with_tasks(input: &[f64], parallelism: usize) -> Result<f64> {
    let config = ReductionConfig::default();
    let strategy = SplitStrategy::Halving {
        seq_threshold: config.seq_threshold,
    };
    ArrayReducer::new(config, strategy).reduce_with_parallelism(input, parallelism)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::io::Write;

    /// 相对误差判等，容忍浮点累加顺序差异
    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-8 * a.abs().max(b.abs()).max(1.0)
    }

    /// 生成不含0元素的随机输入
    fn random_input(n: usize) -> Vec<f64> {
        let mut rng = rand::thread_rng();
        (0..n).map(|_| rng.gen_range(1.0..100.0)).collect()
    }

    #[test]
    fn test_scenario_known_sum() {
        // 1 + 0.5 + 0.25 + 0.25 = 2.0
        let input = vec![1.0, 2.0, 4.0, 4.0];
        assert!(approx_eq(sequential_sum(&input), 2.0));
        assert!(approx_eq(parallel_sum(&input).unwrap(), 2.0));
        for parallelism in [1, 2, 4, 8] {
            let sum = parallel_sum_with_tasks(&input, parallelism).unwrap();
            assert!(approx_eq(sum, 2.0));
        }
    }

    #[test]
    fn test_parallel_matches_sequential_across_parallelism() {
        let input = random_input(10_000);
        let expected = sequential_sum(&input);

        let config = ReductionConfig::default();
        let reducer = ArrayReducer::new(config, SplitStrategy::Halving { seq_threshold: 64 });
        for parallelism in [1, 2, 4, 8] {
            let sum = reducer.reduce_with_parallelism(&input, parallelism).unwrap();
            assert!(
                approx_eq(sum, expected),
                "并行度 {} 的结果 {} 偏离顺序基线 {}", parallelism, sum, expected
            );
        }
    }

    #[test]
    fn test_determinism_bit_identical() {
        let input = random_input(5_000);
        let reducer = ArrayReducer::new(
            ReductionConfig::default(),
            SplitStrategy::Halving { seq_threshold: 64 },
        );

        // 固定 (输入, 阈值) 时递归树形状固定，重复运行结果逐位相同，
        // 并行度和运行时调度抖动都不影响合并顺序
        let first = reducer.reduce_with_parallelism(&input, 4).unwrap();
        for _ in 0..5 {
            let again = reducer.reduce_with_parallelism(&input, 4).unwrap();
            assert_eq!(first.to_bits(), again.to_bits());
        }
        let other_parallelism = reducer.reduce_with_parallelism(&input, 8).unwrap();
        assert_eq!(first.to_bits(), other_parallelism.to_bits());
    }

    #[test]
    fn test_threshold_changes_stay_within_tolerance() {
        let input = random_input(8_000);
        let expected = sequential_sum(&input);

        // 阈值改变递归树形状，允许逐位不同，但必须保持在累加顺序容差内
        for threshold in [1usize, 16, 256, 100_000] {
            let reducer = ArrayReducer::new(
                ReductionConfig::default(),
                SplitStrategy::Halving { seq_threshold: threshold },
            );
            let sum = reducer.reduce_with_parallelism(&input, 4).unwrap();
            assert!(
                approx_eq(sum, expected),
                "阈值 {} 的结果 {} 偏离顺序基线 {}", threshold, sum, expected
            );
        }
    }

    #[test]
    fn test_fixed_chunk_strategy_matches_sequential() {
        let input = random_input(4_097);
        let expected = sequential_sum(&input);

        let reducer = ArrayReducer::new(
            ReductionConfig::default(),
            SplitStrategy::FixedChunk { num_chunks: 4 },
        );
        let sum = reducer.reduce_with_parallelism(&input, 4).unwrap();
        assert!(approx_eq(sum, expected));
    }

    #[test]
    fn test_empty_input_is_zero() {
        assert_eq!(sequential_sum(&[]), 0.0);
        for parallelism in [1, 4] {
            assert_eq!(parallel_sum_with_tasks(&[], parallelism).unwrap(), 0.0);
        }
        assert_eq!(parallel_sum(&[]).unwrap(), 0.0);
    }

    #[test]
    fn test_zero_element_yields_infinity() {
        let input = vec![1.0, 0.0];
        assert_eq!(sequential_sum(&input), f64::INFINITY);
        assert_eq!(parallel_sum_with_tasks(&input, 4).unwrap(), f64::INFINITY);
    }

    #[test]
    fn test_parallel_sum_rejects_odd_length() {
        let input = vec![1.0, 2.0, 4.0];
        match parallel_sum(&input) {
            Err(Error::InvalidArgument(_)) => {}
            other => panic!("奇数长度输入未被拒绝: {:?}", other),
        }
    }

    #[test]
    fn test_zero_parallelism_fails_fast() {
        let input = vec![1.0, 2.0];
        assert!(parallel_sum_with_tasks(&input, 0).is_err());
    }

    #[test]
    fn test_large_constant_array() {
        let n = 2_000_000;
        let input = vec![2.0; n];

        let seq_start = std::time::Instant::now();
        let seq_sum = sequential_sum(&input);
        let seq_elapsed = seq_start.elapsed();

        let par_start = std::time::Instant::now();
        let par_sum = parallel_sum_with_tasks(&input, 4).unwrap();
        let par_elapsed = par_start.elapsed();

        let expected = n as f64 / 2.0;
        assert!(approx_eq(seq_sum, expected));
        assert!(approx_eq(par_sum, expected));
        // 性能属性只做宽松断言：并行不应明显慢于顺序基线
        assert!(par_elapsed <= seq_elapsed + std::time::Duration::from_secs(5));
    }

    #[test]
    fn test_new_from_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("reduction.json");
        let mut file = File::create(&config_path).unwrap();
        write!(file, r#"{{ "sequential_cutoff": 128, "num_workers": 2 }}"#).unwrap();

        let reducer = ArrayReducer::new_from_config_file(&config_path).unwrap();
        assert_eq!(reducer.config.seq_threshold, 128);
        assert_eq!(reducer.config.default_parallelism, 2);

        let input = vec![1.0, 2.0, 4.0, 4.0];
        assert!(approx_eq(reducer.reduce(&input).unwrap(), 2.0));
    }

    #[test]
    fn test_new_from_config_file_rejects_bad_values() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("reduction.json");
        let mut file = File::create(&config_path).unwrap();
        write!(file, r#"{{ "sequential_cutoff": 0, "num_workers": 4 }}"#).unwrap();

        match ArrayReducer::new_from_config_file(&config_path) {
            Err(Error::ConfigError(_)) => {}
            other => panic!("非法配置未被拒绝: {:?}", other),
        }
    }

    #[test]
    fn test_new_from_config_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("missing.json");
        assert!(ArrayReducer::new_from_config_file(&config_path).is_err());
    }
}
