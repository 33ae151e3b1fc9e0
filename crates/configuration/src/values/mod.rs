mod port;
mod secret;

pub use port::Port;
pub use secret::Secret;
