// task.rs
// 定义归约子任务结构体及其状态、优先级枚举。
use crate::types::IndexRange;
use serde::{Deserialize, Serialize};

/// 任务状态枚举，描述任务的生命周期
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TaskStatus {
    /// 等待执行
    Pending,
    /// 正在执行
    Running,
    /// 已完成
    Completed,
    /// 执行失败，包含失败原因
    Failed(String),
}

/// 任务优先级
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TaskPriority {
    Low,
    Normal,
    High,
}

/// 归约子任务结构体，绑定一个索引区间和部分结果
/// 部分结果由执行该任务的工作线程写入一次，由合并阶段读取一次；
/// 任务不跨调用复用，每次顶层调用都新建任务列表。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReduceTask {
    /// 任务唯一ID
    pub task_id: String,
    /// 该任务负责归约的索引区间
    pub range: IndexRange,
    /// 当前任务状态
    pub status: TaskStatus,
    /// 部分归约结果，仅在Completed时有值
    pub partial_result: Option<f64>,
    /// 任务优先级
    pub priority: TaskPriority,
    /// 父任务ID
    pub parent_task_id: Option<String>,
}
