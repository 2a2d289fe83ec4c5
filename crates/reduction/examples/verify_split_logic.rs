use reduction::range_splitter::{RangeSplitter, SplitStrategy};

/// 验证拆分逻辑：各种长度与策略组合下，叶子区间必须互不相交且恰好覆盖全区间
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== 验证区间拆分逻辑 ===");

    let lengths = [0usize, 1, 2, 3, 7, 100, 101, 65_536, 1_000_001];
    let strategies = vec![
        SplitStrategy::Halving { seq_threshold: 1 },
        SplitStrategy::Halving { seq_threshold: 16 },
        SplitStrategy::Halving { seq_threshold: 500_000 },
        SplitStrategy::FixedChunk { num_chunks: 2 },
        SplitStrategy::FixedChunk { num_chunks: 7 },
    ];

    let mut failures = 0;
    for strategy in &strategies {
        println!("\n--- 策略: {} ---", strategy.description());
        let splitter = RangeSplitter::new(strategy.clone());

        for &n in &lengths {
            let leaves = splitter.split_range(n)?;
            let ok = splitter.verify_split(&leaves, n);
            println!(
                "  长度 {:>9}: {} 个叶子，校验{}",
                n,
                leaves.len(),
                if ok { "通过" } else { "失败" }
            );
            if !ok {
                failures += 1;
            }
        }
    }

    if failures == 0 {
        println!("\n🎉 全部拆分校验通过！🎉");
    } else {
        eprintln!("\n❌ 有 {} 个组合校验失败", failures);
    }
    Ok(())
}
