pub mod analysis;
pub mod company;
pub mod evaluation;
pub mod evidence;
pub mod report;
pub mod webpage;
