//! Cards, boards and moves shared by the Freecell solver and its front ends.

pub mod action;
pub mod board;
