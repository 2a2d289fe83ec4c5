// main.rs
// 演示驱动：加载配置并对比顺序与并行倒数和归约。
use reduction::array_reducer::{parallel_sum, parallel_sum_with_tasks, sequential_sum, ArrayReducer};
use reduction::config::ReductionConfig;
use reduction::range_splitter::SplitStrategy;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ---- 1. 加载配置 ----
    let config_path = Path::new("reduction.json");
    let reducer = match ArrayReducer::new_from_config_file(config_path) {
        Ok(reducer) => {
            println!("从 {} 加载配置成功", config_path.display());
            reducer
        }
        Err(_) => {
            println!("配置文件不存在，使用默认配置");
            let config = ReductionConfig::default();
            let strategy = SplitStrategy::Halving {
                seq_threshold: config.seq_threshold,
            };
            ArrayReducer::new(config, strategy)
        }
    };
    println!("当前配置: {}", serde_json::to_string_pretty(&reducer.config)?);
    println!("拆分策略: {}", reducer.strategy.description());

    // ---- 2. 已知结果的小输入 ----
    let small_input = vec![1.0, 2.0, 4.0, 4.0];
    println!("\n小输入 {:?}", small_input);
    println!("  顺序倒数和: {}", sequential_sum(&small_input));
    println!("  二路并行倒数和: {}", parallel_sum(&small_input)?);

    // ---- 3. 大输入对比 ----
    let n = 2_000_000;
    let large_input = vec![2.0f64; n];
    println!("\n大输入: {} 个常量 2.0", n);

    let start = std::time::Instant::now();
    let seq_sum = sequential_sum(&large_input);
    println!("  顺序结果 {:.1}，耗时 {:?}", seq_sum, start.elapsed());

    let start = std::time::Instant::now();
    let par_sum = parallel_sum_with_tasks(&large_input, reducer.config.default_parallelism)?;
    println!(
        "  并行度 {} 结果 {:.1}，耗时 {:?}",
        reducer.config.default_parallelism, par_sum, start.elapsed()
    );

    Ok(())
}
