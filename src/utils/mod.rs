pub mod error;
pub mod validation;
pub mod formats;
pub mod fs;

pub use error::{ConverterError, ConverterResult, PathError, ValidationError};
pub use validation::{validate_settings, validate_input_path, MAX_WORKER_COUNT, MIN_WORKER_COUNT};
pub use formats::{
    Compression,
    ImageType,
    OutputCompressionMode,
    image_type_from_path,
    is_supported_source,
};
pub use fs::{
    get_file_size,
    create_and_check_folder,
    file_stem,
    list_source_files,
    extract_filename,
};
