//! Integration tests for chatreel

mod helpers;

mod cli_test;
mod engine_test;
mod transcript_test;
