mod core;
mod helpers;
mod wrappers;
