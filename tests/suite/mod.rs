mod config;
mod presentation;
mod probe;
