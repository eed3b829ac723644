//! Cross-module tests that drive a whole game

mod traversal;
