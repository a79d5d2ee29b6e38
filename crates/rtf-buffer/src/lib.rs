#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

//! # rtf-buffer
//!
//! ## 模块定位（Why）
//! - 为 RTF 词法扫描提供逐字节累积用的可增长缓冲：扫描器把 token 字节
//!   推进来，随后以数组或文本形式取走，再复位缓冲进入下一个 token；
//! - 把"容量增长策略"与"字节到文本的编码语义"这两件容易在解析器里
//!   散落重复的事情收敛到一个小 crate 中。
//!
//! ## 设计概要（How）
//! - [`ByteBuffer`] 以 `bytes::BytesMut` 为底层存储，按 1.5 倍步进扩容，
//!   区分保留容量的 [`ByteBuffer::reset`] 与重建分配的
//!   [`ByteBuffer::clear`]；
//! - [`TextCodec`] 在字节与文本之间划出编码语义边界，内置 UTF-8、
//!   ASCII、Latin-1 与 Windows-1252 四种 RTF 常见编码；
//! - 所有可恢复失败统一为携带稳定错误码的 [`BufferError`]，常量见
//!   [`codes`]。
//!
//! ## 契约说明（What）
//! - 缓冲由单一解析上下文独占，crate 内不含任何同步原语；
//! - 仅 `[0, len)` 的有效前缀对外可见，越界访问一律返回受检错误；
//! - `no_std + alloc` 可用，`std` Feature 仅作为默认的便利开关。

extern crate alloc;

mod byte_buffer;
mod codec;
mod error;

pub use byte_buffer::{ByteBuffer, MIN_CAPACITY};
pub use codec::{AsciiCodec, Latin1Codec, TextCodec, Utf8Codec, Windows1252Codec};
pub use error::{BufferError, ErrorCause, Result, codes};
