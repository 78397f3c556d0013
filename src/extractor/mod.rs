pub mod body;
pub mod form;
pub mod json;
pub mod path;
pub mod validated;

/// An extractor that wraps a single extracted value.
pub trait Extractor {
    type Extracted;

    fn extracted(&self) -> &Self::Extracted;
}
