//! Unit tests for the SVS pipeline

mod relocator_tests;
mod extractor_tests;
