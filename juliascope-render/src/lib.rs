pub mod block;
pub mod buffer;
pub mod error;
pub mod iteration_buffer;
pub mod palette;
pub mod renderer;
pub mod scheduler;

pub use block::{build_block_rows, Block, COARSE_STEP};
pub use buffer::RenderBuffer;
pub use error::RenderError;
pub use iteration_buffer::IterationBuffer;
pub use palette::{color, colorize, packed_color};
pub use renderer::{render, RenderCancel, RenderPhase, RenderProgress, RenderResult};
pub use scheduler::{render_for_mode, RenderRequest, RenderScheduler, RenderStream};

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
