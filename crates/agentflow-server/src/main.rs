//! agentflow server binary
//!
//! Standalone entry point - delegates to lib.

use agentflow_server::Command;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    match Command::parse(std::env::args().skip(1)) {
        Command::PrintConfig => {
            print!("{}", agentflow_core::config::sample_config());
            Ok(())
        }
        Command::Serve => agentflow_server::run().await,
    }
}
