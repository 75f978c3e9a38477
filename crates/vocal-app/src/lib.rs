pub mod channel;
pub mod controller;
pub mod io;
pub mod popup;
pub mod profile;
pub mod router;
pub mod selection;
pub mod state;
pub mod surface;

#[cfg(test)]
mod tests;
