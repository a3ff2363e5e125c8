pub fn help_text() -> String {
    let mut out = String::from(
        "📖 fraudproof-dash\nTerminal dashboard and scanner for the FraudProof Ledger backend.\n\n",
    );
    out.push_str("🎯 General\n");
    out.push_str("  help                      Show this help message\n");
    out.push_str("  health                    Check that the backend is up\n\n");
    out.push_str("📊 Dashboard\n");
    out.push_str("  dash                      Poll the stats endpoint until ctrl-c\n");
    out.push_str("  dash once                 Fetch and render a single update\n\n");
    out.push_str("🔍 Scanner\n");
    out.push_str(&format!("  {}\n", super::scan::USAGE));
    out.push_str(&format!("  {}\n", super::run_test::USAGE));
    out.push_str(&format!("  {}\n\n", super::detect::USAGE));
    out.push_str("⚙️ Environment\n");
    out.push_str("  FRAUDPROOF_BASE_URL, FRAUDPROOF_STATS_PATH, FRAUDPROOF_REFRESH_SECS,\n");
    out.push_str("  FRAUDPROOF_FRAUD_THRESHOLD, FRAUDPROOF_TIMEOUT_SECS, FRAUDPROOF_CHART_DIR\n");
    out
}

pub fn execute() -> Result<(), String> {
    println!("{}", help_text());
    Ok(())
}
