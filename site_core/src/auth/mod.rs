pub mod gate;
pub mod session;


pub use gate::*;
pub use session::*;
