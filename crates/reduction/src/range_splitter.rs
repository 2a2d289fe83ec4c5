// range_splitter.rs
// 区间拆分器，负责将 [0, N) 按二分或固定分块策略递归拆分为叶子区间。
use crate::error::{Error, Result};
use crate::task::{ReduceTask, TaskPriority, TaskStatus};
use crate::types::IndexRange;
use serde::{Deserialize, Serialize};

/// 区间拆分策略
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SplitStrategy {
    /// 二分拆分：区间元素数达到阈值时按中点二分，递归进行
    /// 产生深度 O(log(N/T)) 的平衡二叉递归树，无论工作线程数多少
    /// 都能限制任务创建开销并利于窃取式调度的负载均衡
    Halving { seq_threshold: usize },
    /// 固定分块拆分：将 [0, N) 平均分为 num_chunks 个连续分块，
    /// 分块大小向上取整，最后一个分块的结束下标收缩到 N
    FixedChunk { num_chunks: usize },
}

impl SplitStrategy {
    /// 策略的可读描述
    pub fn description(&self) -> String {
        match self {
            SplitStrategy::Halving { seq_threshold } => {
                format!("二分拆分（顺序阈值 {}）", seq_threshold)
            }
            SplitStrategy::FixedChunk { num_chunks } => {
                format!("固定分块拆分（{} 个分块）", num_chunks)
            }
        }
    }

    /// 校验策略参数
    pub fn validate(&self) -> Result<()> {
        match self {
            SplitStrategy::Halving { seq_threshold } => {
                if *seq_threshold == 0 {
                    return Err(Error::InvalidArgument("顺序阈值必须大于0".to_string()));
                }
            }
            SplitStrategy::FixedChunk { num_chunks } => {
                if *num_chunks == 0 {
                    return Err(Error::InvalidArgument("分块数必须大于0".to_string()));
                }
            }
        }
        Ok(())
    }
}

/// 区间拆分器，负责把整个输入区间拆分为互不相交的叶子区间
#[derive(Debug)]
pub struct RangeSplitter {
    /// 拆分策略
    pub strategy: SplitStrategy,
}

impl RangeSplitter {
    /// 创建新的区间拆分器
    pub fn new(strategy: SplitStrategy) -> Self {
        Self { strategy }
    }

    /// 将 [0, total) 拆分为按下标顺序排列的叶子区间列表
    /// total 为 0 时返回单个空叶子，对应结果 0
    pub fn split_range(&self, total: usize) -> Result<Vec<IndexRange>> {
        self.strategy.validate()?;

        let root = IndexRange::new(0, total);
        let leaves = match &self.strategy {
            SplitStrategy::Halving { seq_threshold } => {
                let mut leaves = Vec::new();
                Self::split_halving(root, *seq_threshold, &mut leaves);
                leaves
            }
            SplitStrategy::FixedChunk { num_chunks } => Self::split_fixed_chunks(total, *num_chunks),
        };
        Ok(leaves)
    }

    /// 递归二分拆分，叶子按下标顺序收集
    /// 中点拆分不要求 total 能被整除，任意长度都能对半拆
    fn split_halving(range: IndexRange, seq_threshold: usize, leaves: &mut Vec<IndexRange>) {
        if range.is_leaf(seq_threshold) {
            leaves.push(range);
            return;
        }
        let (left, right) = range.split_at_mid();
        Self::split_halving(left, seq_threshold, leaves);
        Self::split_halving(right, seq_threshold, leaves);
    }

    /// 固定分块拆分，分块大小向上取整，末块收缩到 total
    fn split_fixed_chunks(total: usize, num_chunks: usize) -> Vec<IndexRange> {
        if total == 0 {
            return vec![IndexRange::new(0, 0)];
        }

        let mut chunks = Vec::new();
        for chunk in 0..num_chunks {
            let start = Self::chunk_start(chunk, num_chunks, total);
            let end = Self::chunk_end(chunk, num_chunks, total);
            if start >= end {
                // total 小于分块数时尾部分块为空，直接丢弃
                break;
            }
            chunks.push(IndexRange::new(start, end));
        }
        chunks
    }

    /// 计算单个分块的大小（向上取整）
    fn chunk_size(num_chunks: usize, total: usize) -> usize {
        (total + num_chunks - 1) / num_chunks
    }

    /// 计算指定分块的起始下标（含）
    fn chunk_start(chunk: usize, num_chunks: usize, total: usize) -> usize {
        chunk * Self::chunk_size(num_chunks, total)
    }

    /// 计算指定分块的结束下标（不含），收缩到 total
    fn chunk_end(chunk: usize, num_chunks: usize, total: usize) -> usize {
        let end = (chunk + 1) * Self::chunk_size(num_chunks, total);
        std::cmp::min(end, total)
    }

    /// 将 [0, total) 拆分为叶子任务列表，供分块执行路径使用
    pub fn split_task(
        &self,
        total: usize,
        parent_task_id: &str,
        priority: TaskPriority,
    ) -> Result<Vec<ReduceTask>> {
        let leaves = self.split_range(total)?;

        let mut tasks = Vec::with_capacity(leaves.len());
        for (leaf_id, range) in leaves.into_iter().enumerate() {
            tasks.push(ReduceTask {
                task_id: self.generate_task_id(parent_task_id, "leaf", leaf_id),
                range,
                status: TaskStatus::Pending,
                partial_result: None,
                priority,
                parent_task_id: Some(parent_task_id.to_string()),
            });
        }
        Ok(tasks)
    }

    /// 生成任务ID
    fn generate_task_id(&self, parent_id: &str, prefix: &str, id: usize) -> String {
        format!("{}_{}_{}", parent_id, prefix, id)
    }

    /// 验证拆分结果：叶子按下标顺序排列、互不相交、并集恰好覆盖 [0, total)，
    /// 且除 total 为 0 的情形外不含空叶子
    pub fn verify_split(&self, leaves: &[IndexRange], total: usize) -> bool {
        if total == 0 {
            return leaves.len() == 1 && leaves[0] == IndexRange::new(0, 0);
        }
        if leaves.is_empty() {
            return false;
        }

        let mut expected_start = 0;
        for leaf in leaves {
            if leaf.start != expected_start || leaf.is_empty() {
                return false;
            }
            expected_start = leaf.end;
        }
        expected_start == total
    }
}
