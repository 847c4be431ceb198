mod canvas;
mod input;
mod limiter;
mod timer;

pub use canvas::MacroquadCanvas;
pub use input::poll_input;
pub use limiter::FrameLimiter;
pub use timer::Timer;
