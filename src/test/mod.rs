mod classifier;
mod replay;
