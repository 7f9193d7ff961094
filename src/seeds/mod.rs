pub mod users_file_seed;
