use clap::Parser;
use tracing_subscriber::EnvFilter;
use webcrypto::cli::{Cli, Commands};

fn main() {
    // Diagnostics go to stderr; `RUST_LOG=webcrypto=debug` shows every provider call.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Usages { ref alg } => webcrypto::cli::commands::usages::execute(alg.as_deref()),
        Commands::Digest { ref alg, ref file } => {
            webcrypto::cli::commands::digest::execute(&cli, alg, file.as_deref())
        }
        Commands::Random { len, uuid } => webcrypto::cli::commands::random::execute(&cli, len, uuid),
        Commands::Keygen { ref alg, ref format } => {
            webcrypto::cli::commands::keygen::execute(&cli, alg, format)
        }
        Commands::Derive {
            ref hash,
            ref salt,
            bits,
            iterations,
        } => webcrypto::cli::commands::derive::execute(
            &cli,
            hash.as_deref(),
            salt.as_deref(),
            bits,
            iterations,
        ),
        Commands::Completions { ref shell } => webcrypto::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        webcrypto::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
