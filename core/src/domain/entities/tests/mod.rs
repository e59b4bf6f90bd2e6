mod session_tests;
mod token_tests;
