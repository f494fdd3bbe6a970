// Text layout: font metrics, wrapping, page canvases, the overlay editor and the
// paginated résumé renderer.
// Everything here is synchronous and CPU-bound; handlers call it via
// tokio::task::spawn_blocking.

pub mod canvas;
pub mod font_metrics;
pub mod overlay;
pub mod profile;
pub mod renderer;
pub mod text_flow;

// Re-export the public API consumed by the render and documents handlers.
pub use canvas::PageSize;
pub use font_metrics::FontFamily;
pub use overlay::{apply_overlay_edits, OverlayStyle};
pub use profile::SizeProfileKind;
pub use renderer::{render_multi_page, render_single_page_strict};
