mod ficha;
mod reference;
mod status;

pub use ficha::{date_part, Ficha};
pub use reference::{Program, Site};
pub use status::FichaStatus;
