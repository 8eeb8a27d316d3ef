pub mod classify;
pub mod config;
pub mod load;
pub mod model;
pub mod playback;
pub mod replay;
pub mod sim;
pub mod topo;

#[cfg(test)]
mod test;
