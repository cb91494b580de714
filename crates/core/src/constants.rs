/// Constants used throughout the go-struct codebase
// Exported structure
pub const STRUCT_NAME: &str = "MyGoStruct";
pub const STRUCT_SYMBOL_STEM: &str = "go_struct";
pub const STRUCT_DESCRIPTION: &str = "Named record carrying a person's name and age";
pub const METADATA_VERSION: &str = "1.0.0";

// Exported symbols
pub const CREATE_SYMBOL: &str = "create_go_struct";
pub const FREE_SYMBOL: &str = "free_go_struct";
pub const GET_NAME_SYMBOL: &str = "get_go_struct_name";
pub const GET_AGE_SYMBOL: &str = "get_go_struct_age";
pub const SET_NAME_SYMBOL: &str = "set_go_struct_name";
pub const SET_AGE_SYMBOL: &str = "set_go_struct_age";
pub const METADATA_SYMBOL: &str = "go_struct_metadata_json";
pub const FREE_STRING_SYMBOL: &str = "go_struct_free_string";
pub const LAST_ERROR_SYMBOL: &str = "go_struct_last_error";
pub const CLEAR_ERROR_SYMBOL: &str = "go_struct_clear_error";
pub const INIT_LOGGING_SYMBOL: &str = "go_struct_init_logging";

// Library file name as seen by dynamic loaders
pub const LIBRARY_NAME: &str = "go_struct";

#[cfg(target_os = "windows")]
pub const LIBRARY_FILE_NAME: &str = "go_struct.dll";
#[cfg(target_os = "macos")]
pub const LIBRARY_FILE_NAME: &str = "libgo_struct.dylib";
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub const LIBRARY_FILE_NAME: &str = "libgo_struct.so";

// Environment variable names
pub const LOG_FILTER_VAR: &str = "GO_STRUCT_LOG";
pub const LOG_ANSI_VAR: &str = "GO_STRUCT_LOG_ANSI";
pub const LOG_FORMAT_VAR: &str = "GO_STRUCT_LOG_FORMAT";

// Logging defaults
pub const DEFAULT_LOG_FILTER: &str = "warn";

// C boundary status codes
pub const STATUS_OK: i32 = 0;
pub const STATUS_ERROR: i32 = -1;
