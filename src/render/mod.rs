pub mod renderer;

pub use renderer::{Glyph, Renderer};
