pub mod clock;
pub mod guard;
pub mod hash;
pub mod html;
pub mod ids;
