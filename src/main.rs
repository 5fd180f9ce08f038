use std::io;

use kleene::repl::Repl;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.with_writer(io::stderr)
		.init();

	let stdin = io::stdin();
	let stdout = io::stdout();
	Repl::new().run(stdin.lock(), stdout.lock())?;
	Ok(())
}
