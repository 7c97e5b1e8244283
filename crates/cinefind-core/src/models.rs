mod movie;
mod theme;

pub use movie::*;
pub use theme::*;
