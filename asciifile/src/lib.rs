///! Source locations for diagnostics. The abstractions `Position` and `Span`
///! describe a single character, respectively an inclusive range of
///! characters, by their row and column in the input file. `Spanned` attaches
///! such a range to an arbitrary AST node or message.
pub mod maybe_spanned;
pub mod position;
pub mod span;
pub mod spanned;

pub use self::{maybe_spanned::MaybeSpanned, position::Position, span::Span, spanned::Spanned};
