mod allocation_tests;
mod helpers;
mod property_tests;
