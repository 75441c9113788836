//! Checks every accelerated kernel against its original.
//!
//! Usage:
//!   checkasm                          # detected tiers, time seed
//!   CHECKASM_SEED=0x1234 checkasm     # replay a run
//!   CHECKASM_CPU=scalar_opt checkasm  # stop before SSE2
//!   CHECKASM_LOG=debug checkasm       # trace tier pairs and groups

use std::io;
use std::process::ExitCode;

use codec_checkasm::config::LOG_VAR;
use codec_checkasm::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("checkasm: {err}");
            return ExitCode::FAILURE;
        }
    };

    let seed = config.seed();
    let mut ctx = match Context::new(seed) {
        Ok(ctx) => ctx,
        Err(err) => {
            eprintln!("checkasm: {err}");
            std::process::abort();
        }
    };

    let mut reporter = Reporter::new(io::stderr());
    reporter.note(format!("checkasm: using random seed {seed}"));
    tracing::debug!(seed, ?config, "starting");

    let tiers = Tier::chain(config.cpu_flags(CpuFlags::detect()));
    run_checks(&build_registry(), &Native, &tiers, &mut ctx, &mut reporter);
    reporter.conclude().exit_code()
}
