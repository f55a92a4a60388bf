mod graphql_parser_error_tests;
mod graphql_parser_executable_tests;
mod utils;
