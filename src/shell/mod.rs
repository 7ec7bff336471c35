pub mod frame;

pub use frame::{banner, section_title, ShellFrame, SlideDirection};
