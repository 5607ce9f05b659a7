use grillsim::core::execution::average_earnings;
use grillsim::{run_shifts, ConcurrencyMode, KitchenConfig, ShiftConfig};
use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp(None)
        .init();

    println!("🔬 Batch Shift Benchmark");
    println!("========================");

    let kitchen = KitchenConfig::default();
    let shifts = 16;
    let base = ShiftConfig::new().with_duration(600.0).with_seed(1000).with_cook_skill_sigma(0.04);

    println!("\n📊 Sequential");
    let start = Instant::now();
    let sequential = run_shifts(&kitchen, &base, shifts)?;
    let seq_time = start.elapsed();
    println!("   {} shifts in {:?}", sequential.len(), seq_time);

    println!("\n📊 Rayon");
    let parallel_config = base.clone().with_concurrency(ConcurrencyMode::Rayon);
    let start = Instant::now();
    let parallel = run_shifts(&kitchen, &parallel_config, shifts)?;
    let par_time = start.elapsed();
    println!("   {} shifts in {:?}", parallel.len(), par_time);

    println!("\n🔍 Results");
    if sequential == parallel {
        println!("   ✅ Sequential and Rayon reports are identical");
    } else {
        println!("   ❌ Sequential and Rayon reports differ");
    }
    println!("   Average wallet: ${:.2}", average_earnings(&sequential));
    for report in &sequential {
        println!(
            "   seed {:>5}: {:>3} orders, {:>2} expired, ${:>8.2}, grade {}",
            report.seed,
            report.stats.orders_completed,
            report.stats.orders_expired,
            report.wallet,
            report.grade
        );
    }
    if par_time.as_secs_f64() > 0.0 {
        println!(
            "\n   Speedup: {:.2}x",
            seq_time.as_secs_f64() / par_time.as_secs_f64()
        );
    }

    Ok(())
}
