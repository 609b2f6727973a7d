mod backend;
mod reports;
mod workflow;
