use std::io::{self, Read, Write};
use flate2::{Compression, write::GzEncoder, read::GzDecoder};
use thiserror::Error;

/// 魔数常量 - 用于标识目录文件格式
pub const MAGIC_BYTES: &[u8] = b"SHCAT"; // Storefront Catalog

/// 头部长度：魔数 + 版本号(2) + 原始数据大小(4)
const HEADER_LEN: usize = MAGIC_BYTES.len() + 2 + 4;

pub type CodecResult<T> = Result<T, CodecError>;

/// 编解码错误
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("序列化失败: {0}")]
    Encode(String),

    #[error("反序列化失败: {0}")]
    Decode(String),

    #[error("数据太短，无法解析: {0} 字节")]
    TooShort(usize),

    #[error("无效的文件格式：魔数不匹配")]
    BadMagic,

    #[error("不支持的版本: {0}.{1}")]
    UnsupportedVersion(u8, u8),

    #[error("解压后数据大小不匹配: 期望 {expected} 字节, 实际 {actual} 字节")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("I/O 错误: {0}")]
    Io(#[from] io::Error),
}

/// 将对象序列化为二进制格式
pub fn to_binary<T: serde::Serialize>(obj: &T) -> CodecResult<Vec<u8>> {
    bincode::serde::encode_to_vec(obj, bincode::config::standard())
        .map_err(|e| CodecError::Encode(e.to_string()))
}

/// 从二进制格式反序列化对象
pub fn from_binary<T: for<'a> serde::de::Deserialize<'a>>(data: &[u8]) -> CodecResult<T> {
    bincode::serde::decode_from_slice(data, bincode::config::standard())
        .map_err(|e| CodecError::Decode(e.to_string()))
        .map(|(value, _)| value)
}

/// 将对象序列化为压缩的二进制格式
pub fn to_compressed<T: serde::Serialize>(obj: &T, version: [u8; 2]) -> CodecResult<Vec<u8>> {
    let binary = to_binary(obj)?;

    let mut output = Vec::with_capacity(HEADER_LEN + binary.len() / 2);
    output.extend_from_slice(MAGIC_BYTES);
    output.extend_from_slice(&version);
    output.extend_from_slice(&(binary.len() as u32).to_le_bytes());

    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(&binary)?;
    output.extend_from_slice(&encoder.finish()?);

    Ok(output)
}

/// 从压缩的二进制格式反序列化对象，允许指定支持的最大版本
pub fn from_compressed_with_max_version<T: for<'a> serde::de::Deserialize<'a>>(
    data: &[u8],
    max_version: u8,
) -> CodecResult<T> {
    validate_compressed_data_with_max_version(data, max_version)?;

    // 读取原始数据大小
    let size_offset = MAGIC_BYTES.len() + 2;
    let mut size_bytes = [0u8; 4];
    size_bytes.copy_from_slice(&data[size_offset..HEADER_LEN]);
    let original_size = u32::from_le_bytes(size_bytes) as usize;

    // 头部长度不可信：预分配按压缩数据估算，读取最多多读一个字节用于判断超长
    let mut decoder = GzDecoder::new(&data[HEADER_LEN..]).take(original_size as u64 + 1);
    let mut decompressed = Vec::with_capacity(original_size.min(data.len().saturating_mul(8)));
    decoder.read_to_end(&mut decompressed)?;

    if decompressed.len() != original_size {
        return Err(CodecError::SizeMismatch {
            expected: original_size,
            actual: decompressed.len(),
        });
    }

    from_binary(&decompressed)
}

/// 验证压缩数据头部，返回版本号
pub fn validate_compressed_data_with_max_version(data: &[u8], max_version: u8) -> CodecResult<[u8; 2]> {
    if data.len() < HEADER_LEN {
        return Err(CodecError::TooShort(data.len()));
    }

    if &data[..MAGIC_BYTES.len()] != MAGIC_BYTES {
        return Err(CodecError::BadMagic);
    }

    let version_offset = MAGIC_BYTES.len();
    let version = [data[version_offset], data[version_offset + 1]];

    // 只比较主版本号
    if version[0] > max_version {
        return Err(CodecError::UnsupportedVersion(version[0], version[1]));
    }

    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Product;

    const MAX_VERSION: u8 = 4;

    fn decode(data: &[u8]) -> CodecResult<Vec<Product>> {
        from_compressed_with_max_version(data, MAX_VERSION)
    }

    fn sample() -> Vec<Product> {
        vec![
            Product::new(0, "Elegant Blue Dress", "dresses", 299).with_sizes(["S", "M", "L"]),
            Product::new(1, "Premium White Shirt", "shirts", 129).with_color("white"),
        ]
    }

    #[test]
    fn compressed_data_carries_header() {
        let data = to_compressed(&sample(), [1, 2]).unwrap();

        assert_eq!(&data[..MAGIC_BYTES.len()], MAGIC_BYTES);
        assert_eq!(validate_compressed_data_with_max_version(&data, MAX_VERSION).unwrap(), [1, 2]);
        assert_eq!(decode(&data).unwrap(), sample());
    }

    #[test]
    fn rejects_short_data() {
        let err = decode(b"SHC").unwrap_err();
        assert!(matches!(err, CodecError::TooShort(3)));
    }

    #[test]
    fn rejects_wrong_magic() {
        let mut data = to_compressed(&sample(), [1, 0]).unwrap();
        data[0] = b'X';

        let err = decode(&data).unwrap_err();
        assert!(matches!(err, CodecError::BadMagic));
    }

    #[test]
    fn rejects_newer_major_version() {
        let data = to_compressed(&sample(), [5, 0]).unwrap();

        let err = decode(&data).unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedVersion(5, 0)));
    }

    #[test]
    fn rejects_size_mismatch() {
        let mut data = to_compressed(&sample(), [1, 0]).unwrap();
        let size_offset = MAGIC_BYTES.len() + 2;
        data[size_offset..HEADER_LEN].copy_from_slice(&1u32.to_le_bytes());

        let err = decode(&data).unwrap_err();
        assert!(matches!(err, CodecError::SizeMismatch { expected: 1, actual: 2 }));
    }

    #[test]
    fn oversized_length_header_is_rejected() {
        let mut data = to_compressed(&sample(), [1, 0]).unwrap();
        let real_size = to_binary(&sample()).unwrap().len();
        let size_offset = MAGIC_BYTES.len() + 2;
        data[size_offset..HEADER_LEN].copy_from_slice(&u32::MAX.to_le_bytes());

        let err = decode(&data).unwrap_err();
        match err {
            CodecError::SizeMismatch { expected, actual } => {
                assert_eq!(expected, u32::MAX as usize);
                assert_eq!(actual, real_size);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
