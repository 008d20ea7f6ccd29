//! Common interface of generated union containers.

/// Implemented by every generated union container.
///
/// The tag alone identifies which variant a value holds; payload fields of
/// other variants stay empty.
pub trait Tagged {
    /// Returns the discriminator of this value.
    fn tag(&self) -> &str;

    /// Returns true if this value holds the variant with `tag`.
    fn is(&self, tag: &str) -> bool {
        self.tag() == tag
    }
}
