//! Terminal front end for Sneakflight.

pub mod input;
pub mod terminal;

pub mod renderer {
    use anyhow::Result;
    use sneakflight_core::GameWorld;

    /// Context handed to renderer implementations.
    pub struct RendererContext<'a> {
        pub world: &'a mut GameWorld,
    }

    pub trait Renderer {
        /// Stable identifier describing the renderer implementation (e.g., "terminal").
        fn name(&self) -> &'static str;

        /// Launch the renderer; blocks until the player quits.
        fn run(&self, ctx: RendererContext<'_>) -> Result<()>;
    }
}

pub use input::{KeyCommand, translate_key};
pub use terminal::TerminalRenderer;
