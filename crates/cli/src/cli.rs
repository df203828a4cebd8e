use std::path::PathBuf;

use clap::{Parser, Subcommand};
use url::Url;

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "wirefix")]
#[command(about = "Clean up and repair model-generated HTML fragments")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Output format
	#[arg(short, long, global = true, value_enum, default_value = "json")]
	pub format: OutputFormat,

	/// Load pipeline settings from a JSON file; flags override its values
	#[arg(long, global = true, value_name = "FILE")]
	pub config: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Strip prose, fences and document scaffolding, and capture CSS
	Sanitize {
		/// Input file (stdin when omitted or `-`)
		file: Option<PathBuf>,
		/// Class that namespaced CSS is authored under
		#[arg(long, value_name = "NAME")]
		wrapper_class: Option<String>,
	},

	/// Repair broken brackets and validate with an HTML parser
	Validate {
		/// Input file (stdin when omitted or `-`)
		file: Option<PathBuf>,
	},

	/// Sanitize, inline linked stylesheets, then repair
	Prepare {
		/// Input file (stdin when omitted or `-`)
		file: Option<PathBuf>,
		/// Origin that root-relative stylesheet links resolve against
		#[arg(long, value_name = "URL")]
		origin: Option<Url>,
		/// Report stylesheet links without fetching them
		#[arg(long)]
		no_inline: bool,
		/// Per-stylesheet fetch timeout
		#[arg(long, value_name = "MS")]
		timeout_ms: Option<u64>,
	},
}

impl Commands {
	pub fn name(&self) -> &'static str {
		match self {
			Commands::Sanitize { .. } => "sanitize",
			Commands::Validate { .. } => "validate",
			Commands::Prepare { .. } => "prepare",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_global_flags_after_subcommand() {
		let cli = Cli::try_parse_from(["wirefix", "validate", "page.html", "-vv", "-f", "text"]).expect("args should parse");
		assert_eq!(cli.verbose, 2);
		assert_eq!(cli.format, OutputFormat::Text);
		assert!(matches!(cli.command, Commands::Validate { file: Some(_) }));
	}

	#[test]
	fn prepare_flags() {
		let cli = Cli::try_parse_from(["wirefix", "prepare", "--origin", "https://app.test", "--no-inline", "--timeout-ms", "500"])
			.expect("args should parse");
		let Commands::Prepare {
			file,
			origin,
			no_inline,
			timeout_ms,
		} = cli.command
		else {
			panic!("expected prepare");
		};
		assert!(file.is_none());
		assert_eq!(origin.map(|u| u.to_string()), Some("https://app.test/".to_string()));
		assert!(no_inline);
		assert_eq!(timeout_ms, Some(500));
	}

	#[test]
	fn rejects_malformed_origin() {
		assert!(Cli::try_parse_from(["wirefix", "prepare", "--origin", "not a url"]).is_err());
	}
}
