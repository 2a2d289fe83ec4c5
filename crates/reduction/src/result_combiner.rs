// result_combiner.rs
// 结果合并器，负责合并各子任务（左右子树、分块等）的部分归约结果。
use crate::error::{Error, Result};
use crate::task::{ReduceTask, TaskStatus};

/// 结果合并器，自底向上合并部分结果
/// 浮点加法不满足结合律，最终结果取决于递归树形状（由输入长度与
/// 阈值唯一确定），与线程数和运行时调度无关：同样的 (N, 阈值, 输入)
/// 两次运行产生逐位相同的结果，但与纯顺序从左到右求和只在
/// 浮点误差范围内近似相等。
#[derive(Debug)]
pub struct ResultCombiner;

impl ResultCombiner {
    pub fn new() -> Self {
        Self
    }

    /// 合并左右两个兄弟子树的部分结果，左在前右在后
    /// 只在两个子任务都完成后调用；根节点的合并结果即整次调用的返回值
    pub fn combine(&self, left: f64, right: f64) -> f64 {
        left + right
    }

    /// 按给定顺序从左到右合并一组部分结果
    pub fn combine_ordered(&self, partials: &[f64]) -> f64 {
        let mut sum = 0.0;
        for partial in partials {
            sum += partial;
        }
        sum
    }

    /// 合并一组分块任务的结果，按分块顺序从左到右累加
    /// 所有任务必须已完成并带有部分结果，否则拒绝合并
    pub fn combine_tasks(&self, tasks: &[ReduceTask]) -> Result<f64> {
        if tasks.is_empty() {
            return Err(Error::InvalidArgument("没有任务结果可合并".to_string()));
        }

        let mut partials = Vec::with_capacity(tasks.len());
        for task in tasks {
            if task.status != TaskStatus::Completed {
                return Err(Error::InvalidArgument(format!(
                    "任务 {} 尚未完成，无法合并", task.task_id
                )));
            }
            match task.partial_result {
                Some(partial) => partials.push(partial),
                None => {
                    return Err(Error::InvalidArgument(format!(
                        "任务 {} 缺少部分结果", task.task_id
                    )));
                }
            }
        }
        Ok(self.combine_ordered(&partials))
    }
}

impl Default for ResultCombiner {
    fn default() -> Self {
        Self::new()
    }
}
