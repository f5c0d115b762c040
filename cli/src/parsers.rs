//! Command line enums.
//!
//! Each variant accepts its full name, any prefix that still determines it uniquely, and a few
//! short aliases.

use clap::ValueEnum;
use clap::builder::PossibleValue;
use tiletrans_engine::RemainderPolicy;

/// Element format streamed through the engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ElementOptions {
    U32,
    /// Pair of `f32`, 8 bytes.
    ComplexF32,
    /// Pair of `i16`, 4 bytes.
    ComplexI16,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RemainderOptions {
    Reject,
    PartialTiles,
}

impl From<RemainderOptions> for RemainderPolicy {
    fn from(value: RemainderOptions) -> Self {
        match value {
            RemainderOptions::Reject => Self::Reject,
            RemainderOptions::PartialTiles => Self::PartialTiles,
        }
    }
}

/// Builds the [`PossibleValue`] for `base`, accepting every prefix of at least
/// `min_unique_base_prefix` characters, plus each alias and its unique prefixes.
fn get_aliases(
    base: &'static str,
    min_unique_base_prefix: usize,
    aliases: &[(&'static str, usize)],
) -> PossibleValue {
    PossibleValue::new(base).aliases(
        (min_unique_base_prefix..base.len())
            .map(|i| &base[..i])
            .chain(aliases.iter().flat_map(|&(alias, min_unique)| {
                (min_unique..alias.len() + 1).map(move |i| &alias[..i])
            })),
    )
}

impl ValueEnum for ElementOptions {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::U32, Self::ComplexF32, Self::ComplexI16]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            Self::U32 => get_aliases("u32", 1, &[("int", 1)]),
            Self::ComplexF32 => get_aliases("complex-f32", 9, &[("cf32", 3), ("float", 1)]),
            Self::ComplexI16 => get_aliases("complex-i16", 9, &[("ci16", 3), ("short", 1)]),
        })
    }
}

impl ValueEnum for RemainderOptions {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Reject, Self::PartialTiles]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            Self::Reject => get_aliases("reject", 1, &[]),
            Self::PartialTiles => get_aliases("partial-tiles", 1, &[("clamp", 1)]),
        })
    }
}
