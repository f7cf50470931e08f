//! webamon - Webamon threat intelligence search from the terminal.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match webamon_cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let _ = webamon_cli::output::write_error(&mut std::io::stderr(), &format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
