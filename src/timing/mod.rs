mod scheduler;

pub use scheduler::{PRESS_FLASH, ResetQueue};
