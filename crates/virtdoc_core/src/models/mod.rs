//! Value types shared by the document model and the renderer.

/// Node identity, kinds, and creation specs.
pub mod node;
/// Logical cursor and selection positions.
pub mod position;

#[cfg(test)]
mod tests;
