//! Operator-facing summary printed after a bootstrap run.
//!
//! Plain text on stdout; the secret itself is never printed, only its
//! fingerprint.

use std::io::{self, Write};

use crate::bootstrap::BootstrapReport;

impl BootstrapReport {
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "✓ {} bootstrapped", self.output.display())?;
        writeln!(out, "  public key     : {}", self.verification_key)?;
        writeln!(out, "  private key    : from {}", self.source)?;
        writeln!(out, "  fingerprint    : {}", self.fingerprint)?;
        writeln!(
            out,
            "  output         : {} ({}, {} bytes)",
            self.output.display(),
            self.write_mode,
            self.bytes_written
        )?;
        if let (Some(check), Some(key)) = (&self.output_check, &self.checked_key) {
            let state = if check.key_defined { "set" } else { "not set" };
            writeln!(out, "  dotenv check   : {} entries, {key} {state}", check.entries)?;
        }
        if !self.marker_found {
            writeln!(
                out,
                "! marker '{}' not found in {}; template written unchanged",
                self.marker,
                self.template.display()
            )?;
        }
        Ok(())
    }
}
