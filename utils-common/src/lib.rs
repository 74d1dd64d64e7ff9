pub mod compression;
pub mod models;

// 重新导出常用类型和函数，方便直接使用
pub use compression::{
    from_binary, from_compressed_with_max_version, to_binary, to_compressed,
    validate_compressed_data_with_max_version, CodecError, CodecResult,
};
pub use models::{CatalogMetadata, PriceSpan, Product};
