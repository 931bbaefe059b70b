use std::path::PathBuf;

use clap::Parser;

use envboot::config::{Overrides, WriteMode};

#[derive(Parser, Debug)]
#[command(name = "envboot")]
#[command(about = "Write a .env file from a sample template and a key-pair file", long_about = None)]
pub struct CliArgs {
    /// Path to configuration file (default: envboot.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override key-pair file
    #[arg(short, long)]
    pub keys: Option<PathBuf>,

    /// Override sample template
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Override output env file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Truncate the output instead of appending to it
    #[arg(long)]
    pub replace: bool,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}

impl CliArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            key_file: self.keys.clone(),
            template: self.template.clone(),
            output: self.output.clone(),
            write_mode: self.replace.then_some(WriteMode::Replace),
            log_level: self.log_level.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_means_no_overrides() {
        let args = CliArgs::parse_from(["envboot"]);
        let o = args.overrides();
        assert!(o.key_file.is_none());
        assert!(o.write_mode.is_none());
        assert!(o.log_level.is_none());
    }

    #[test]
    fn flags_map_to_overrides() {
        let args = CliArgs::parse_from([
            "envboot", "-k", "k.txt", "-t", "s.env", "-o", "out.env", "--replace", "--log-level", "debug",
        ]);
        let o = args.overrides();
        assert_eq!(o.key_file, Some(PathBuf::from("k.txt")));
        assert_eq!(o.template, Some(PathBuf::from("s.env")));
        assert_eq!(o.output, Some(PathBuf::from("out.env")));
        assert_eq!(o.write_mode, Some(WriteMode::Replace));
        assert_eq!(o.log_level.as_deref(), Some("debug"));
    }
}
