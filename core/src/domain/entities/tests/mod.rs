mod property_tests;
mod user_tests;
