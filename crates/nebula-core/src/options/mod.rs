//! Opciones con nombre que configuran stages y módulos.
mod cell;
mod list;

pub use cell::{OptionCell, OptionKind};
pub use list::OptionList;
