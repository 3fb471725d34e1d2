mod analysis;
mod helpers;
