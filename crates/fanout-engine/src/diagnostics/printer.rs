//! Builder-pattern printer for rendering diagnostics.

use std::fmt::Write;

use fanout_core::Colors;

use super::Diagnostics;
use super::message::{DiagnosticMessage, Severity};

/// Builder for rendering diagnostics with various options.
pub struct DiagnosticsPrinter<'d> {
    diagnostics: &'d Diagnostics,
    colored: bool,
    errors_only: bool,
}

impl<'d> DiagnosticsPrinter<'d> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            colored: false,
            errors_only: false,
        }
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn errors_only(mut self, value: bool) -> Self {
        self.errors_only = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let c = Colors::new(self.colored);
        let shown = self
            .diagnostics
            .iter()
            .filter(|d| !self.errors_only || d.is_error());

        for (i, diag) in shown.enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            format_one(w, diag, c)?;
        }
        Ok(())
    }
}

fn format_one(w: &mut impl Write, diag: &DiagnosticMessage, c: Colors) -> std::fmt::Result {
    let color = match diag.severity() {
        Severity::Error => c.red,
        Severity::Warning => c.yellow,
    };
    writeln!(
        w,
        "{color}{}[{}]{}: {}",
        diag.severity(),
        diag.kind.code(),
        c.reset,
        diag.message
    )?;
    writeln!(w, "  {}-->{} {}", c.dim, c.reset, diag.location)?;
    for related in &diag.related {
        writeln!(w, "  {}note:{} {} ({})", c.blue, c.reset, related.message, related.location)?;
    }
    for hint in &diag.hints {
        writeln!(w, "  {}= hint:{} {}", c.dim, c.reset, hint)?;
    }
    Ok(())
}

impl Diagnostics {
    pub fn printer(&self) -> DiagnosticsPrinter<'_> {
        DiagnosticsPrinter::new(self)
    }
}
