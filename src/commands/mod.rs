pub mod dash;
pub mod scan;
pub mod health;
pub mod run_test;
pub mod detect;
pub mod help;

use tracing::{debug, error};

use crate::config::Config;

/// Run the command named by the first argument.
/// Returns a user-facing error message on failure.
pub async fn handle_command(config: &Config, args: &[String]) -> Result<(), String> {
    let parts: Vec<&str> = args.iter().map(String::as_str).collect();
    let Some((command, rest)) = parts.split_first() else {
        return help::execute();
    };

    debug!("Running command {} {:?}", command, rest);

    let result = match command.to_lowercase().as_str() {
        "dash" | "dashboard" => dash::execute(config, rest).await,
        "scan" | "analyze" => scan::execute(config, rest).await,
        "health" => health::execute(config).await,
        "run-test" | "test" => run_test::execute(config, rest).await,
        "detect" => detect::execute(config, rest).await,
        "help" | "-h" | "--help" => help::execute(),
        other => Err(format!("Unknown command '{}'. Run `help` for usage.", other)),
    };

    if let Err(e) = &result {
        error!("❌ Error executing command {}: {}", command, e);
    }

    result.map_err(|e| {
        if e.trim().is_empty() {
            "❌ An error occurred while executing the command.".to_string()
        } else {
            e
        }
    })
}
