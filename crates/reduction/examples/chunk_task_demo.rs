use reduction::array_reducer::sequential_sum;
use reduction::leaf_reducer::LeafReducer;
use reduction::pool_executor::PoolExecutor;
use reduction::range_splitter::{RangeSplitter, SplitStrategy};
use reduction::result_combiner::ResultCombiner;
use reduction::task::TaskPriority;
use prettytable::{row, Table};
use uuid::Uuid;

/// 分块任务流水演示：拆分为叶子任务、并行执行、按分块顺序合并
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== 分块任务流水演示 ===");

    // 1. 准备输入数据
    let input: Vec<f64> = (1..=20).map(|i| i as f64).collect();
    println!("输入: 1..=20 的倒数和");

    // 2. 按固定分块策略拆分任务
    let strategy = SplitStrategy::FixedChunk { num_chunks: 4 };
    let splitter = RangeSplitter::new(strategy.clone());
    println!("拆分策略: {}", strategy.description());

    let parent_task_id = format!("demo_{}", Uuid::new_v4());
    let mut tasks = splitter.split_task(input.len(), &parent_task_id, TaskPriority::Normal)?;
    println!("成功拆分为 {} 个任务", tasks.len());

    // 3. 在并行度为4的线程池上执行全部任务
    let executor = PoolExecutor::new(4)?;
    let reducer = LeafReducer::new();
    executor.execute_tasks(&mut tasks, &input, &reducer)?;

    // 4. 表格化打印任务执行情况
    let mut table = Table::new();
    table.add_row(row!["序号", "任务ID", "区间", "优先级", "状态", "部分结果"]);
    for (i, task) in tasks.iter().enumerate() {
        table.add_row(row![
            i + 1,
            &task.task_id,
            format!("[{}, {})", task.range.start, task.range.end),
            format!("{:?}", task.priority),
            format!("{:?}", task.status),
            task.partial_result
                .map(|partial| format!("{:.6}", partial))
                .unwrap_or_else(|| "-".to_string())
        ]);
    }
    table.printstd();

    // 5. 按分块顺序合并并与顺序基线对比
    let combiner = ResultCombiner::new();
    let merged = combiner.combine_tasks(&tasks)?;
    let baseline = sequential_sum(&input);
    println!("合并结果: {:.12}", merged);
    println!("顺序基线: {:.12}", baseline);
    println!("偏差: {:.3e}", (merged - baseline).abs());

    Ok(())
}
