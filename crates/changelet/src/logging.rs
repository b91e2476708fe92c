use tracing_subscriber::EnvFilter;

const CRATES: [&str; 8] = [
    "changelet",
    "changelet_core",
    "changelet_parse",
    "changelet_git",
    "changelet_version",
    "changelet_project",
    "changelet_changelog",
    "changelet_operations",
];

fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn default_directives(verbosity: u8) -> String {
    let level = level_for(verbosity);
    let mut directives = vec![String::from("warn")];
    directives.extend(CRATES.iter().map(|krate| format!("{krate}={level}")));
    directives.join(",")
}

/// Logs go to stderr so command output on stdout stays clean. `RUST_LOG`
/// takes precedence over `-v`.
pub(crate) fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(verbosity)))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
