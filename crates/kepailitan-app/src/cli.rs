use std::path::PathBuf;

use clap::Parser;

/// Prosedur Kepailitan: search, highlight and navigate the site content.
///
/// Reads IPC messages (one JSON object per line) from `--script` or stdin
/// and prints the JS snippets the page would receive.
#[derive(Parser, Debug)]
#[command(name = "kepailitan", version, about)]
pub struct Args {
    /// Page outline (JSON) to load.
    pub content: Option<PathBuf>,

    /// File of IPC messages to replay instead of reading stdin.
    #[arg(short = 's', long)]
    pub script: Option<PathBuf>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error) or a full
    /// filter directive.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Persist progress and quiz results to this file.
    #[arg(long)]
    pub storage: Option<PathBuf>,

    /// Print the effective config as JSON and exit.
    #[arg(long)]
    pub print_config: bool,

    /// Print the service worker generated from the offline config and exit.
    #[arg(long)]
    pub service_worker: bool,
}

impl Args {
    /// Filter directive for the log level override, if any.
    pub fn log_directive(&self) -> Option<String> {
        let level = self.log_level.as_deref()?.trim();
        match level {
            "trace" | "debug" | "info" | "warn" | "error" => Some(format!("kepailitan={level}")),
            other => Some(other.to_string()),
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_content_and_flags() {
        let args = Args::try_parse_from([
            "kepailitan",
            "site.json",
            "--script",
            "session.jsonl",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.content, Some(PathBuf::from("site.json")));
        assert_eq!(args.script, Some(PathBuf::from("session.jsonl")));
        assert_eq!(args.log_directive().as_deref(), Some("kepailitan=debug"));
        assert!(!args.print_config);
        assert!(!args.service_worker);
    }

    #[test]
    fn service_worker_flag() {
        let args = Args::try_parse_from(["kepailitan", "--service-worker"]).unwrap();
        assert!(args.service_worker);
    }

    #[test]
    fn full_directive_passes_through() {
        let args =
            Args::try_parse_from(["kepailitan", "--log-level", "kepailitan_search=trace"]).unwrap();
        assert_eq!(args.log_directive().as_deref(), Some("kepailitan_search=trace"));
        assert_eq!(args.content, None);
    }
}
