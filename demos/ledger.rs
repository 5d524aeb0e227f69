//! AMM ledger walkthrough.
//!
//! Loads a ledger from TOML, funds a pool, quotes and executes swaps with a
//! slippage tolerance, withdraws, and prints every event as it is published.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=amm_ledger=debug cargo run --example ledger
//! ```

use amm_ledger::prelude::*;
use tracing_subscriber::EnvFilter;

const CONFIG: &str = r#"
operator = "0x00000000000000000000000000000000000000aa"
fee = { numerator = 3, denominator = 1000 }
initial_shares = "geometric_mean"
ratio_tolerance = 1

[base_asset]
symbol = "ETH"
decimals = 18

[[whitelist]]
address = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"
decimals = 6
symbol = "USDC"
"#;

/// Renders smallest units with the declared decimals, e.g. `1.500000`.
fn format_units(amount: Amount, decimals: Decimals) -> String {
    let unit = decimals.unit();
    let whole = amount.get() / unit;
    let frac = amount.get() % unit;
    if decimals.get() == 0 {
        return whole.to_string();
    }
    format!("{whole}.{frac:0width$}", width = usize::from(decimals.get()))
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== AMM ledger (x · y = k) ===\n");

    // ── 1. Load configuration ───────────────────────────────────────────
    let config = LedgerConfig::from_toml_str(CONFIG)?;
    let base_decimals = config.base_asset().decimals();
    let base_symbol = config.base_asset().symbol().to_owned();
    let ledger = PoolManager::new(config)?;

    let usdc_addr: TokenAddress = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".parse()?;
    let usdc = ledger
        .whitelisted_token(usdc_addr)
        .ok_or("USDC should be whitelisted")?;
    println!("Whitelisted: {usdc}");
    println!("Fee:         {}", ledger.engine().fee());

    let printer = ledger.subscribe(|record: &EventRecord| println!("  [event] {record}"));

    let alice: AccountId = "0x0000000000000000000000000000000000000001".parse()?;
    let bob: AccountId = "0x0000000000000000000000000000000000000002".parse()?;

    // ── 2. Alice opens the pool at 2 000 USDC / ETH ─────────────────────
    let eth = base_decimals.unit();
    let usdc_unit = usdc.decimals().unit();
    let added = ledger.add_liquidity(
        usdc_addr,
        Amount::new(200_000 * usdc_unit),
        Amount::new(100 * eth),
        alice,
    )?;
    println!("\n--- Alice deposits ---");
    println!(
        "  {} USDC + {} {base_symbol}",
        format_units(added.token_amount, usdc.decimals()),
        format_units(added.base_amount, base_decimals)
    );
    println!("  Shares minted: {}", added.shares_minted);

    // ── 3. Bob quotes 1 ETH → USDC and allows 0.5% slippage ─────────────
    let amount_in = Amount::new(eth);
    let quote = ledger.quote_swap(Asset::Base, Asset::Token(usdc_addr), amount_in)?;
    let min_out =
        SlippageTolerance::new(BasisPoints::new(50))?.min_amount_out(quote.amount_out())?;
    println!("\n--- Bob quotes 1 {base_symbol} ---");
    println!(
        "  Quote:   {} USDC",
        format_units(quote.amount_out(), usdc.decimals())
    );
    println!("  Minimum: {} USDC", format_units(min_out, usdc.decimals()));
    println!(
        "  Fee:     {} {base_symbol}",
        format_units(quote.fee(), base_decimals)
    );

    let swap = ledger.swap(Asset::Base, Asset::Token(usdc_addr), amount_in, min_out, bob)?;
    println!(
        "  Filled:  {} USDC",
        format_units(swap.amount_out, usdc.decimals())
    );

    // ── 4. A stale minimum is rejected without touching the pool ────────
    let stale = ledger.swap(
        Asset::Base,
        Asset::Token(usdc_addr),
        amount_in,
        quote.amount_out(),
        bob,
    );
    match stale {
        Err(e @ AmmError::SlippageExceeded { .. }) => println!("\nRepeat at old quote: {e}"),
        other => println!("\nRepeat at old quote unexpectedly returned {other:?}"),
    }

    // ── 5. Alice withdraws half ─────────────────────────────────────────
    let half = Shares::new(added.shares_minted.get() / 2);
    let removed = ledger.remove_liquidity(usdc_addr, half, alice)?;
    println!("\n--- Alice withdraws {half} shares ---");
    println!(
        "  {} USDC + {} {base_symbol}",
        format_units(removed.token_amount, usdc.decimals()),
        format_units(removed.base_amount, base_decimals)
    );

    // ── 6. Pool state and event log ─────────────────────────────────────
    let snapshot = ledger.pool(usdc_addr)?;
    println!("\n--- Pool ---");
    println!("  {}", snapshot.reserves);
    println!("  Total shares: {}", snapshot.total_shares);
    println!("  Status:       {:?}", snapshot.status());

    println!("\n--- Events ---");
    for record in ledger.events(usdc_addr) {
        println!("  {}", serde_json::to_string(&record)?);
    }

    ledger.unsubscribe(printer);
    println!("\n=== Done ===");
    Ok(())
}
