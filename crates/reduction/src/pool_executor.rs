// pool_executor.rs
// 池执行器，负责在限定并行度的线程池上执行 fork-join 归约并阻塞等待结果。
use crate::error::{Error, Result};
use crate::leaf_reducer::LeafReducer;
use crate::result_combiner::ResultCombiner;
use crate::task::{ReduceTask, TaskStatus};
use crate::types::IndexRange;
use rayon::prelude::*;

/// 池执行器，持有本次调用的并行度上限
/// 线程池按调用创建、随调用结束销毁，不作为进程级全局资源，
/// 任何退出路径（包括失败）都会随 ThreadPool 的 Drop 回收工作线程。
pub struct PoolExecutor {
    /// 并行度：并发活跃工作线程数上限
    pub parallelism: usize,
}

impl PoolExecutor {
    /// 创建新的池执行器，并行度必须不小于1
    pub fn new(parallelism: usize) -> Result<Self> {
        if parallelism == 0 {
            return Err(Error::InvalidArgument("并行度必须不小于1".to_string()));
        }
        Ok(Self { parallelism })
    }

    /// 构建与并行度等大的线程池
    /// 构建失败（如请求的线程数超出平台限制）直接上抛，不降级为顺序执行
    fn build_pool(&self) -> Result<rayon::ThreadPool> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.parallelism)
            .build()?;
        Ok(pool)
    }

    /// 在线程池上执行二分 fork-join 归约，阻塞直到整棵递归树完成
    /// 并行度为1时退化为纯顺序递归，数值结果与任意更大的池逐位相同，
    /// 因为合并顺序由递归树形状而非线程数决定。
    pub fn run_halving(
        &self,
        input: &[f64],
        seq_threshold: usize,
        reducer: &LeafReducer,
        combiner: &ResultCombiner,
    ) -> Result<f64> {
        let pool = self.build_pool()?;
        let root = IndexRange::new(0, input.len());
        let sum = pool.install(|| Self::reduce_recursive(input, root, seq_threshold, reducer, combiner));
        Ok(sum)
    }

    /// 递归节点的执行：一个子区间交给调度器异步执行，当前线程深度优先
    /// 继续另一个子区间，随后 join 等待，再合并左右结果。
    /// join 是同步屏障：任一内部节点的合并一定发生在两个孩子的结果
    /// 完整写出之后；无亲缘关系的子树之间不保证执行顺序，但左右结果
    /// 在最终加法中的先后固定，保证数值输出确定。
    fn reduce_recursive(
        input: &[f64],
        range: IndexRange,
        seq_threshold: usize,
        reducer: &LeafReducer,
        combiner: &ResultCombiner,
    ) -> f64 {
        if range.is_leaf(seq_threshold) {
            return reducer.reduce(input, range);
        }

        let (left, right) = range.split_at_mid();
        let (left_sum, right_sum) = rayon::join(
            || Self::reduce_recursive(input, left, seq_threshold, reducer, combiner),
            || Self::reduce_recursive(input, right, seq_threshold, reducer, combiner),
        );
        combiner.combine(left_sum, right_sum)
    }

    /// 在线程池上并行执行一组分块任务，按任务顺序返回部分结果
    /// 各任务区间互不相交，输入只读共享，无需加锁；每个任务的
    /// partial_result 只由执行它的工作线程写入一次。
    pub fn execute_tasks(
        &self,
        tasks: &mut [ReduceTask],
        input: &[f64],
        reducer: &LeafReducer,
    ) -> Result<Vec<f64>> {
        let pool = self.build_pool()?;

        pool.install(|| {
            tasks.par_iter_mut().for_each(|task| {
                task.status = TaskStatus::Running;
                let partial = reducer.reduce(input, task.range);
                task.partial_result = Some(partial);
                task.status = TaskStatus::Completed;
            });
        });

        let mut partials = Vec::with_capacity(tasks.len());
        for task in tasks.iter() {
            match task.partial_result {
                Some(partial) => partials.push(partial),
                None => {
                    return Err(Error::Other(format!("任务 {} 执行后缺少结果", task.task_id)));
                }
            }
        }
        Ok(partials)
    }
}
