use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::error::{BufferError, Result, codes};

/// `TextCodec` 描述字节与文本互转的最小编解码契约。
///
/// # 设计背景（Why）
/// - [`ByteBuffer::decode`](crate::ByteBuffer::decode) 只负责交出有效字节，
///   非法序列如何处理完全是编码自身的语义，必须在类型层划清这条边界；
/// - RTF 文档通过 `\ansicpg` 声明代码页，扫描器在运行期才知道应使用哪种
///   编码，故采用对象安全的 trait 以支持动态选择。
///
/// # 契约说明（What）
/// - `decode` 失败必须返回 [`codes::CODEC_DECODE`]，`encode` 失败必须返回
///   [`codes::CODEC_ENCODE`]，并在消息中给出首个违规位置或字符；
/// - 双向实现需满足往返律：`decode(encode(s)) == s` 对编码可表示的任意
///   文本成立；
/// - 实现必须无状态或内部自管并发安全，以满足 `Send + Sync`。
///
/// # 设计取舍（Trade-offs）
/// - 为对象安全放弃了零拷贝返回（统一产出 `String`/`Vec<u8>`）；token
///   级别的载荷很小，复制成本可忽略。
pub trait TextCodec: Send + Sync {
    /// 返回编码的 IANA 首选名称，用于日志与诊断。
    fn name(&self) -> &'static str;

    /// 将字节序列解码为文本。
    fn decode(&self, bytes: &[u8]) -> Result<String>;

    /// 将文本编码为字节序列。
    fn encode(&self, text: &str) -> Result<Vec<u8>>;
}

/// 严格 UTF-8 编解码器。
///
/// 解码等价于 [`core::str::from_utf8`]，遇到非法序列整体失败并携带
/// [`core::str::Utf8Error`] 作为底层原因，不做有损替换。
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8Codec;

impl TextCodec for Utf8Codec {
    fn name(&self) -> &'static str {
        "utf-8"
    }

    fn decode(&self, bytes: &[u8]) -> Result<String> {
        match core::str::from_utf8(bytes) {
            Ok(text) => Ok(text.to_string()),
            Err(err) => Err(BufferError::new(
                codes::CODEC_DECODE,
                format!("UTF-8 序列非法：偏移 {}", err.valid_up_to()),
            )
            .with_cause(err)),
        }
    }

    fn encode(&self, text: &str) -> Result<Vec<u8>> {
        Ok(text.as_bytes().to_vec())
    }
}

/// 严格 7-bit ASCII 编解码器。
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiCodec;

impl TextCodec for AsciiCodec {
    fn name(&self) -> &'static str {
        "us-ascii"
    }

    fn decode(&self, bytes: &[u8]) -> Result<String> {
        match bytes.iter().position(|byte| !byte.is_ascii()) {
            Some(pos) => Err(BufferError::new(
                codes::CODEC_DECODE,
                format!("非 ASCII 字节 0x{:02X}：偏移 {pos}", bytes[pos]),
            )),
            None => Ok(bytes.iter().map(|byte| char::from(*byte)).collect()),
        }
    }

    fn encode(&self, text: &str) -> Result<Vec<u8>> {
        match text.chars().position(|ch| !ch.is_ascii()) {
            Some(pos) => Err(BufferError::new(
                codes::CODEC_ENCODE,
                format!("字符超出 ASCII 范围：字符序号 {pos}"),
            )),
            None => Ok(text.as_bytes().to_vec()),
        }
    }
}

/// ISO-8859-1（Latin-1）编解码器。
///
/// 每个字节恰好对应同值码点，解码是全函数；编码仅接受 U+00FF 以内的
/// 字符。
#[derive(Debug, Clone, Copy, Default)]
pub struct Latin1Codec;

impl TextCodec for Latin1Codec {
    fn name(&self) -> &'static str {
        "iso-8859-1"
    }

    fn decode(&self, bytes: &[u8]) -> Result<String> {
        Ok(bytes.iter().map(|byte| char::from(*byte)).collect())
    }

    fn encode(&self, text: &str) -> Result<Vec<u8>> {
        text.chars()
            .map(|ch| {
                u8::try_from(u32::from(ch)).map_err(|_| {
                    BufferError::new(
                        codes::CODEC_ENCODE,
                        format!("字符 {ch:?} 超出 Latin-1 范围"),
                    )
                })
            })
            .collect()
    }
}

/// Windows-1252（cp1252）0x80–0x9F 区段的码点映射表。
///
/// 与 WHATWG encoding 标准及 .NET `Encoding.GetEncoding(1252)` 行为一致：
/// 五个未定义槽位（0x81、0x8D、0x8F、0x90、0x9D）按同值 C1 控制码点
/// 透传。
const CP1252_HIGH: [char; 32] = [
    '\u{20AC}', '\u{0081}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{008D}', '\u{017D}', '\u{008F}',
    '\u{0090}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{009D}', '\u{017E}', '\u{0178}',
];

/// Windows-1252 编解码器，RTF `\ansicpg1252` 文档的默认代码页。
///
/// # 行为概览（How）
/// - `0x00..=0x7F` 与 `0xA0..=0xFF` 按同值码点直通；
/// - `0x80..=0x9F` 查 [`CP1252_HIGH`] 表；
/// - 编码为解码的精确逆映射，无法表示的字符返回
///   [`codes::CODEC_ENCODE`]。
#[derive(Debug, Clone, Copy, Default)]
pub struct Windows1252Codec;

impl TextCodec for Windows1252Codec {
    fn name(&self) -> &'static str {
        "windows-1252"
    }

    fn decode(&self, bytes: &[u8]) -> Result<String> {
        Ok(bytes
            .iter()
            .map(|byte| match byte {
                0x80..=0x9F => CP1252_HIGH[usize::from(byte - 0x80)],
                _ => char::from(*byte),
            })
            .collect())
    }

    fn encode(&self, text: &str) -> Result<Vec<u8>> {
        text.chars()
            .map(|ch| {
                if let Some(slot) = CP1252_HIGH.iter().position(|mapped| *mapped == ch) {
                    return Ok(0x80 + slot as u8);
                }
                match u32::from(ch) {
                    code @ (0x00..=0x7F | 0xA0..=0xFF) => Ok(code as u8),
                    _ => Err(BufferError::new(
                        codes::CODEC_ENCODE,
                        format!("字符 {ch:?} 无法映射到 Windows-1252"),
                    )),
                }
            })
            .collect()
    }
}
