pub mod idll;
