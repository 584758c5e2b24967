//! LinkProbe CLI

use clap::Parser;

use linkprobe::cli::{run_cli_mode, Args};
use linkprobe::logging;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logging::init(args.verbose, args.log_json);

    let exit_code = run_cli_mode(args).await;
    std::process::exit(exit_code);
}
