//! Rule-based guidance shown on the landing view.

pub mod guidance;
