//! Named shader uniforms and the channel that stages them per draw

pub mod channel;
pub mod uniforms;

pub use channel::ShaderChannel;
pub use uniforms::{UniformSink, UniformTable, UniformValue};
