//! Diagnostics go to stderr; stdout is reserved for command output.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const CRATES: [&str; 4] = ["filetag", "filetag_config", "filetag_library", "filetag_store"];

/// Default filter for our own crates at the given verbosity.
///
/// Dependencies stay at `warn` unless `RUST_LOG` says otherwise.
fn default_filter(verbose: u8, quiet: bool) -> String {
    if quiet {
        return "error".to_string();
    }
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let mut directives = vec!["warn".to_string()];
    directives.extend(CRATES.iter().map(|krate| format!("{krate}={level}")));
    directives.join(",")
}

pub fn init(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbose, quiet)));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, false, "warn,filetag=warn,filetag_config=warn,filetag_library=warn,filetag_store=warn")]
    #[case(1, false, "warn,filetag=info,filetag_config=info,filetag_library=info,filetag_store=info")]
    #[case(5, false, "warn,filetag=trace,filetag_config=trace,filetag_library=trace,filetag_store=trace")]
    #[case(0, true, "error")]
    fn test_default_filter(#[case] verbose: u8, #[case] quiet: bool, #[case] expected: &str) {
        assert_eq!(default_filter(verbose, quiet), expected);
    }
}
