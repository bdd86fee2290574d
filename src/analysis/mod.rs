/// Reading selection for the weather page.
///
/// Submodules:
/// - `current` — picks the latest filled slot from a station's series and
///   resolves station lookups to a renderable pair.

pub mod current;
