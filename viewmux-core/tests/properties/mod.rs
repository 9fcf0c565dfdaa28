mod layout_tests;
mod manager_tests;
