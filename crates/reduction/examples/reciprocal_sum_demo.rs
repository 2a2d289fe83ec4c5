use reduction::array_reducer::{sequential_sum, ArrayReducer};
use reduction::config::ReductionConfig;
use reduction::range_splitter::SplitStrategy;
use prettytable::{row, Table};
use rand::Rng;
use std::time::Instant;

/// 对比演示：顺序基线与不同并行度下的倒数和归约
fn main() -> anyhow::Result<()> {
    println!("=== 倒数和归约演示：顺序基线 vs 并行归约 ===");

    // ---- 1. 生成随机输入 ----
    // 元素取值范围 [1, 100)，避免出现 0 导致无穷大
    let n = 4_000_000;
    let mut rng = rand::thread_rng();
    let input: Vec<f64> = (0..n).map(|_| rng.gen_range(1.0..100.0)).collect();
    println!("生成随机输入，共 {} 个元素", n);

    // ---- 2. 顺序基线 ----
    let start = Instant::now();
    let seq_sum = sequential_sum(&input);
    let seq_elapsed = start.elapsed();
    println!("顺序基线结果: {:.6}，耗时 {:?}", seq_sum, seq_elapsed);

    // ---- 3. 不同并行度下的并行归约 ----
    let config = ReductionConfig::default();
    let reducer = ArrayReducer::new(
        config,
        SplitStrategy::Halving { seq_threshold: 100_000 },
    );

    let mut table = Table::new();
    table.add_row(row!["并行度", "结果", "与基线偏差", "耗时"]);
    for parallelism in [1usize, 2, 4, 8] {
        let start = Instant::now();
        match reducer.reduce_with_parallelism(&input, parallelism) {
            Ok(par_sum) => {
                table.add_row(row![
                    parallelism,
                    format!("{:.6}", par_sum),
                    format!("{:.3e}", (par_sum - seq_sum).abs()),
                    format!("{:?}", start.elapsed())
                ]);
            }
            Err(e) => {
                eprintln!("❌ 并行度 {} 归约失败: {}", parallelism, e);
            }
        }
    }
    table.printstd();

    println!("\n=== 演示完成 ===");
    Ok(())
}
