use std::time::Instant;

use clap::Parser;
use serde_json::Value;
use tracing::error;
use wirefix_cli::cli::Cli;
use wirefix_cli::error::error_code;
use wirefix_cli::output::{ResultBuilder, print_result};
use wirefix_cli::{commands, logging};

#[tokio::main]
async fn main() {
	let start = Instant::now();
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	let format = cli.format;
	let command = cli.command.name();

	match commands::dispatch(cli).await {
		Ok(data) => {
			let result = ResultBuilder::new(command).started_at(start).data(data).build();
			print_result(&result, format);
		}
		Err(err) => {
			error!(target = "wirefix", error = %err, "command failed");
			let result = ResultBuilder::<Value>::new(command).started_at(start).error(error_code(&err), err.to_string()).build();
			print_result(&result, format);
			std::process::exit(1);
		}
	}
}
