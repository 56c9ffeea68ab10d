mod strategy_tests;
mod text_tests;
