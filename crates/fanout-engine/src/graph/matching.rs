//! Matching an edge's requested variation against the target's variants.
//!
//! For every axis a target variant carries, the requested value is, in
//! order: the value pinned on the edge; the source variant's
//! dependency-variation override; the source variant's own value; the
//! first value listed for that axis among the target's variants. A target
//! variant matches when every one of its axes equals the requested value.

use fanout_core::Variation;

use super::{Edge, Module, Variant};

/// Why an edge failed to resolve to exactly one variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mismatch {
    Missing {
        requested: Variation,
        available: Vec<String>,
    },
    Ambiguous {
        requested: Variation,
        candidates: Vec<String>,
    },
}

impl Mismatch {
    pub fn requested(&self) -> &Variation {
        match self {
            Self::Missing { requested, .. } | Self::Ambiguous { requested, .. } => requested,
        }
    }
}

/// Resolve `edge`, declared on `source`, to an index into `target`'s variants.
pub fn match_edge(source: &Variant, edge: &Edge, target: &Module) -> Result<usize, Mismatch> {
    let requested = effective_request(source, edge, target);

    let mut matches = target
        .variants
        .iter()
        .enumerate()
        .filter(|(_, candidate)| satisfies(candidate, &requested))
        .map(|(i, _)| i);

    let Some(first) = matches.next() else {
        return Err(Mismatch::Missing {
            requested,
            available: display_names(target.variants.iter()),
        });
    };

    let rest: Vec<usize> = matches.collect();
    if rest.is_empty() {
        return Ok(first);
    }

    let candidates = std::iter::once(first)
        .chain(rest)
        .map(|i| &target.variants[i]);
    Err(Mismatch::Ambiguous {
        candidates: display_names(candidates),
        requested,
    })
}

/// The request over every axis present on any target variant.
fn effective_request(source: &Variant, edge: &Edge, target: &Module) -> Variation {
    let mut requested = Variation::new();
    for candidate in &target.variants {
        for (axis, listed) in candidate.variation.iter() {
            if requested.has_axis(axis) {
                continue;
            }
            let value = edge
                .requested
                .get(axis)
                .or_else(|| source.dependency_variation.get(axis))
                .or_else(|| source.variation.get(axis))
                .unwrap_or(listed);
            requested.set(axis, value);
        }
    }
    requested
}

fn satisfies(candidate: &Variant, requested: &Variation) -> bool {
    candidate
        .variation
        .iter()
        .all(|(axis, value)| requested.get(axis) == Some(value))
}

fn display_names<'a>(variants: impl Iterator<Item = &'a Variant>) -> Vec<String> {
    variants
        .map(|v| {
            let name = v.name();
            if name.is_empty() {
                "<default>".to_string()
            } else {
                name
            }
        })
        .collect()
}
