// types.rs
// 定义通用类型，如半开索引区间、默认常量等辅助类型。
use serde::{Deserialize, Serialize};

/// 输入序列上的半开索引区间 [start, end)
/// 不变式：start <= end，兄弟区间互不相交且并集等于父区间
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRange {
    pub start: usize,
    pub end: usize,
}

impl IndexRange {
    /// 创建新的索引区间
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// 区间内元素个数
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// 区间是否为空
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// 区间中点（整数下取整除法）
    pub fn midpoint(&self) -> usize {
        (self.start + self.end) / 2
    }

    /// 按中点二分为左右两个子区间
    /// 左区间为 [start, mid)，右区间为 [mid, end)
    pub fn split_at_mid(&self) -> (IndexRange, IndexRange) {
        let mid = self.midpoint();
        (IndexRange::new(self.start, mid), IndexRange::new(mid, self.end))
    }

    /// 区间是否应作为叶子直接归约：长度低于顺序阈值，
    /// 或只剩不足两个元素、已无法再按中点二分
    pub fn is_leaf(&self, seq_threshold: usize) -> bool {
        self.len() < seq_threshold || self.len() <= 1
    }
}

// 常量定义，避免硬编码
/// 默认顺序阈值：区间元素数低于该值时直接顺序归约，不再拆分
pub const DEFAULT_SEQ_THRESHOLD: usize = 500_000;
/// 默认二路入口使用的并行度
pub const DEFAULT_TWO_WAY_PARALLELISM: usize = 2;
