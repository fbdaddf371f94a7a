//! `cut-selftest` entry point

fn main() {
    // Structured logging goes to stderr so it never interleaves with the stdout report
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .try_init();

    cut::cli::run();
}
