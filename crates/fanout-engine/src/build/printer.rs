use std::fmt::Write;

use super::BuildResolved;
use crate::resolve::VariantOutput;

/// What a [`BuildPrinter`] renders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PrintMode {
    #[default]
    Variants,
    Deps,
    LinkOrder,
    Registries,
}

pub struct BuildPrinter<'b> {
    build: &'b BuildResolved,
    mode: PrintMode,
    module: Option<&'b str>,
    registry: Option<&'b str>,
}

impl<'b> BuildPrinter<'b> {
    pub fn new(build: &'b BuildResolved) -> Self {
        Self {
            build,
            mode: PrintMode::default(),
            module: None,
            registry: None,
        }
    }

    pub fn mode(mut self, mode: PrintMode) -> Self {
        self.mode = mode;
        self
    }

    /// Restrict output to one module.
    pub fn module(mut self, module: Option<&'b str>) -> Self {
        self.module = module;
        self
    }

    /// Restrict registry output to one list.
    pub fn registry(mut self, registry: Option<&'b str>) -> Self {
        self.registry = registry;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        match self.mode {
            PrintMode::Variants => self.format_variants(w),
            PrintMode::Deps => self.format_outputs(w, format_deps),
            PrintMode::LinkOrder => self.format_outputs(w, format_link_order),
            PrintMode::Registries => self.format_registries(w),
        }
    }

    fn selected(&self, module: &str) -> bool {
        self.module.is_none_or(|m| m == module)
    }

    fn format_variants(&self, w: &mut impl Write) -> std::fmt::Result {
        for module in self.build.graph().modules() {
            if !self.selected(module.name()) {
                continue;
            }
            write!(w, "{} ({})", module.name(), module.kind_name())?;
            if module.is_failed() {
                write!(w, " failed")?;
            }
            writeln!(w)?;
            for variant in module.variants() {
                let name = variant.name();
                write!(w, "  {}", display_name(&name))?;
                if variant.is_hidden() {
                    write!(w, " (hidden)")?;
                }
                writeln!(w)?;
            }
        }
        Ok(())
    }

    fn format_outputs(
        &self,
        w: &mut impl Write,
        body: fn(&VariantOutput, &mut dyn Write) -> std::fmt::Result,
    ) -> std::fmt::Result {
        for output in self.build.outputs() {
            if !self.selected(&output.module) {
                continue;
            }
            writeln!(w, "{} {}", output.module, display_name(&output.variant))?;
            body(output, w)?;
        }
        Ok(())
    }

    fn format_registries(&self, w: &mut impl Write) -> std::fmt::Result {
        for (list, names) in self.build.registries().snapshot() {
            if self.registry.is_some_and(|r| r != list) {
                continue;
            }
            write!(w, "{list}:")?;
            for name in &names {
                write!(w, " {name}")?;
            }
            writeln!(w)?;
        }
        Ok(())
    }
}

fn format_deps(output: &VariantOutput, w: &mut dyn Write) -> std::fmt::Result {
    for (kind, paths) in &output.deps {
        write_list(w, kind.as_str(), paths)?;
    }
    if !output.include_dirs.is_empty() {
        write_list(w, "exported", &output.include_dirs)?;
    }
    Ok(())
}

fn format_link_order(output: &VariantOutput, w: &mut dyn Write) -> std::fmt::Result {
    let Some(order) = &output.link_order else {
        return writeln!(w, "  (no link step)");
    };
    write_list(w, "all", &order.all)?;
    write_list(w, "declared", &order.declared)?;
    if !output.whole_static.is_empty() {
        write_list(w, "whole", &output.whole_static)?;
    }
    Ok(())
}

fn write_list(w: &mut dyn Write, label: &str, items: &[String]) -> std::fmt::Result {
    write!(w, "  {label}:")?;
    for item in items {
        write!(w, " {item}")?;
    }
    writeln!(w)
}

fn display_name(name: &str) -> &str {
    if name.is_empty() { "<default>" } else { name }
}

impl BuildResolved {
    pub fn printer(&self) -> BuildPrinter<'_> {
        BuildPrinter::new(self)
    }
}
