use grillsim::core::execution::LineCook;
use grillsim::{
    FlipOutcome, FoodKind, Kitchen, KitchenConfig, KitchenObserver, OrderTicket, ServeReceipt,
    ServingTray, ShiftConfig, Station,
};

/// Prints kitchen events as they happen
struct ConsoleObserver;

impl KitchenObserver for ConsoleObserver {
    fn on_order_taken(&mut self, ticket: &OrderTicket) {
        println!("  🧾 New ticket: {} ({:.0}s)", ticket.description(), ticket.time_limit());
    }

    fn on_order_expired(&mut self, ticket: &OrderTicket) {
        println!("  ⌛ Ticket expired: {}", ticket.description());
    }

    fn on_food_burnt(&mut self, station: Station, kind: FoodKind) {
        println!("  🔥 {:?} burnt on {:?}", kind, station);
    }

    fn on_flip_resolved(&mut self, burner: usize, outcome: &FlipOutcome) {
        let verdict = if outcome.success { "clean" } else { "botched" };
        println!(
            "  🍳 Flip on burner {} {} ({} perfect, +{:.1}s)",
            burner, verdict, outcome.perfect_hits, outcome.bonus_seconds
        );
    }

    fn on_served(&mut self, receipt: &ServeReceipt) {
        println!(
            "  💵 Served {}x Burger + {}x Fries: ${:.2} (tip ${:.2}, {})",
            receipt.burgers,
            receipt.fries,
            receipt.payment.total,
            receipt.payment.tip,
            if receipt.is_match() { "matched" } else { "no matching ticket" }
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .format_timestamp(None)
        .init();

    println!("🍔 Starting Grill Shift");

    let kitchen_config = KitchenConfig::default();
    let shift = ShiftConfig::new().with_duration(300.0).with_seed(7).with_cook_skill_sigma(0.03);
    kitchen_config.validate()?;
    shift.validate()?;

    println!("Configuration:");
    println!(
        "  Burners: {}, fryer baskets: {}",
        kitchen_config.burners, kitchen_config.fryer_baskets
    );
    println!("  Shift: {:.0}s at dt={}, seed {}", shift.duration, shift.dt, shift.seed);
    println!();

    let mut kitchen = Kitchen::new(kitchen_config.clone(), shift.seed)?;
    kitchen.add_observer(Box::new(ConsoleObserver));
    let tray = ServingTray::new(kitchen_config.tray_max_burgers, kitchen_config.tray_max_fries);
    let mut cook = LineCook::new(&shift, tray)?;

    for _ in 0..shift.tick_count() {
        cook.step(&mut kitchen, shift.dt);
    }

    println!();
    println!("{}", kitchen.stats().summary_text());
    println!("Wallet: ${:.2}", kitchen.wallet());
    let tally = cook.tally();
    println!(
        "Cook: {} clean flips, {} botched, {} fries salted, {} items trashed",
        tally.flips_passed, tally.flips_failed, tally.fries_salted, tally.items_trashed
    );

    Ok(())
}
