//! `byte_buffer_contract` 集成测试：聚焦 `ByteBuffer` 的追加、复位与读取契约。
//!
//! # 测试总览（Why）
//! - 校验单字节/切片/区间三种追加路径的长度与内容语义；
//! - 覆盖越界索引、非法区间等错误路径，确保返回的错误码稳定且失败不改写
//!   缓冲内容；
//! - 验证 `reset`/`clear` 的容量语义差异与扩容过程中的内容保持性。

use rtf_buffer::{AsciiCodec, ByteBuffer, MIN_CAPACITY, Utf8Codec, codes};

/// 逐字节追加后，`len` 与 `to_array` 必须按追加顺序如实反映内容。
#[test]
fn put_u8_tracks_count_and_contents_in_order() {
    let mut buffer = ByteBuffer::new();
    buffer.put_u8(0x41);
    buffer.put_u8(0x42);
    buffer.put_u8(0x43);

    assert_eq!(buffer.len(), 3);
    assert_eq!(buffer.to_array(), Some(vec![0x41, 0x42, 0x43]));
    assert_eq!(
        buffer.decode(&AsciiCodec).expect("ASCII 解码应成功"),
        "ABC"
    );
}

/// 追加空切片不得改变长度与内容。
#[test]
fn put_slice_with_empty_source_is_noop() {
    let mut buffer = ByteBuffer::new();
    buffer.put_slice(b"seed");
    buffer.put_slice(&[]);

    assert_eq!(buffer.len(), 4);
    assert_eq!(buffer.to_array(), Some(b"seed".to_vec()));
}

/// 区间追加只复制 `[start, start + count)` 窗口内的字节。
#[test]
fn put_range_copies_requested_window() {
    let mut buffer = ByteBuffer::new();
    buffer
        .put_range(&[0x00, 0x01, 0x02, 0x03], 1, 2)
        .expect("合法窗口应追加成功");

    assert_eq!(buffer.to_array(), Some(vec![0x01, 0x02]));
}

/// `count == 0` 的区间追加为合法无操作。
#[test]
fn put_range_with_zero_count_is_noop() {
    let mut buffer = ByteBuffer::new();
    buffer
        .put_range(b"abcd", 4, 0)
        .expect("零长度窗口应直接成功");

    assert!(buffer.is_empty());
    assert_eq!(buffer.to_array(), None);
}

/// 越界窗口必须返回稳定错误码，且缓冲保持逐字节不变。
#[test]
fn put_range_out_of_bounds_fails_and_leaves_buffer_unchanged() {
    let mut buffer = ByteBuffer::new();
    buffer.put_slice(b"kept");

    let err = buffer
        .put_range(&[0x10, 0x11, 0x12, 0x13], 3, 5)
        .expect_err("越界窗口应失败");
    assert_eq!(err.code(), codes::BUFFER_RANGE_OUT_OF_BOUNDS);
    assert_eq!(buffer.to_array(), Some(b"kept".to_vec()));

    // start + count 溢出 usize 的极端窗口同样拒绝。
    let err = buffer
        .put_range(b"abcd", usize::MAX, 2)
        .expect_err("溢出窗口应失败");
    assert_eq!(err.code(), codes::BUFFER_RANGE_OUT_OF_BOUNDS);
    assert_eq!(buffer.to_array(), Some(b"kept".to_vec()));
}

/// 受检索引读写：范围内成功，范围外返回 `buffer.index_out_of_range`。
#[test]
fn get_and_set_are_bounds_checked() {
    let mut buffer = ByteBuffer::new();
    buffer.put_slice(&[0xAA, 0xBB]);

    assert_eq!(buffer.get(1).expect("范围内读取应成功"), 0xBB);
    buffer.set(0, 0xCC).expect("范围内写入应成功");
    assert_eq!(buffer.to_array(), Some(vec![0xCC, 0xBB]));

    let err = buffer.get(2).expect_err("越界读取应失败");
    assert_eq!(err.code(), codes::BUFFER_INDEX_OUT_OF_RANGE);
    let err = buffer.set(2, 0x00).expect_err("越界写入应失败");
    assert_eq!(err.code(), codes::BUFFER_INDEX_OUT_OF_RANGE);
    // 失败路径不得扩展逻辑长度。
    assert_eq!(buffer.len(), 2);
}

/// `reset` 清零长度但保留已到达的容量，复用时不再触发扩容。
#[test]
fn reset_preserves_reached_capacity_for_reuse() {
    let mut buffer = ByteBuffer::new();
    buffer.put_slice(&[0x5A; 4096]);
    let reached = buffer.capacity();
    assert!(reached >= 4096);

    buffer.reset();
    assert_eq!(buffer.len(), 0);
    assert_eq!(buffer.to_array(), None);
    assert!(
        buffer.capacity() >= reached,
        "reset 之后容量不得低于复位前水位"
    );

    // 重放相同内容应与全新缓冲产出一致。
    buffer.put_slice(&[0x5A; 4096]);
    let mut fresh = ByteBuffer::new();
    fresh.put_slice(&[0x5A; 4096]);
    assert_eq!(buffer.to_array(), fresh.to_array());
}

/// `clear` 丢弃旧分配并回到最小容量档位。
#[test]
fn clear_reinitializes_to_minimum_capacity() {
    let mut buffer = ByteBuffer::new();
    buffer.put_slice(&[0x77; 4096]);

    buffer.clear();
    assert_eq!(buffer.len(), 0);
    assert_eq!(buffer.to_array(), None);
    assert!(buffer.capacity() >= MIN_CAPACITY);
    assert!(
        buffer.capacity() < 4096,
        "clear 之后不应继续持有大块分配"
    );
}

/// 空缓冲的 `to_array` 返回 `None` 而非零长度数组。
#[test]
fn to_array_returns_none_when_empty() {
    let buffer = ByteBuffer::new();
    assert_eq!(buffer.to_array(), None);

    let mut buffer = ByteBuffer::new();
    buffer.put_u8(0x01);
    buffer.reset();
    assert_eq!(buffer.to_array(), None);
}

/// 空缓冲对任意编码都解码为空串。
#[test]
fn decode_on_empty_buffer_yields_empty_string() {
    let buffer = ByteBuffer::new();
    assert_eq!(buffer.decode(&Utf8Codec).expect("空缓冲解码应成功"), "");
    assert_eq!(buffer.decode(&AsciiCodec).expect("空缓冲解码应成功"), "");
}

/// 1000 次单字节追加跨越多轮扩容，内容不得丢失或错位。
#[test]
fn repeated_growth_never_corrupts_existing_bytes() {
    let mut buffer = ByteBuffer::new();
    for i in 0..1000u32 {
        buffer.put_u8((i % 251) as u8);
    }

    assert_eq!(buffer.len(), 1000);
    let contents = buffer.to_array().expect("非空缓冲应返回内容");
    for (i, byte) in contents.iter().enumerate() {
        assert_eq!(u32::from(*byte), (i as u32) % 251, "索引 {i} 处内容错位");
    }
}

/// 预分配构造可避开增长路径，且不低于最小容量下限。
#[test]
fn with_capacity_respects_request_and_floor() {
    let buffer = ByteBuffer::with_capacity(1024);
    assert!(buffer.capacity() >= 1024);

    let floor = ByteBuffer::with_capacity(0);
    assert!(floor.capacity() >= MIN_CAPACITY);
}
