use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use bytes::{BufMut, BytesMut};

use crate::codec::TextCodec;
use crate::error::{BufferError, Result, codes};

/// 缓冲初始与 [`ByteBuffer::clear`] 复位后的最小容量（字节）。
///
/// RTF 词法扫描中绝大多数控制字与十六进制转义的长度都在 16 字节以内，
/// 该下限可让典型 token 在不触发扩容的情况下完成累积。
pub const MIN_CAPACITY: usize = 16;

/// `ByteBuffer` 是面向 RTF 词法扫描的可增长字节累积缓冲。
///
/// # 设计动机（Why）
/// - 扫描器逐字节推进，事先无法得知 token 的最终长度，需要一个追加写入、
///   自动扩容的累积容器，避免调用端自行管理容量；
/// - 同一缓冲会在成千上万个 token 之间复用，[`reset`](Self::reset) 保留
///   已到达的容量，使稳态解析路径趋于零分配。
///
/// # 结构解析（How）
/// - 底层为 [`BytesMut`]，逻辑长度即 `storage.len()`，容量即
///   `storage.capacity()`，不再额外维护游标；
/// - 扩容由内部 `grow_to` 统一执行：目标容量取
///   `max(所需长度, 当前容量 * 1.5)`，摊还后单字节追加为均摊 O(1)；
/// - 读取侧仅暴露 `[0, len)` 的有效前缀：按索引的受检访问、整体复制
///   （[`to_array`](Self::to_array)）与文本解码（[`decode`](Self::decode)）。
///
/// # 契约说明（What）
/// - **前置条件**：实例由单一解析上下文独占；跨线程共享需由调用方串行化；
/// - **后置条件**：任何操作结束后 `len() <= capacity()` 恒成立；容量只增
///   不减，唯一例外是 [`clear`](Self::clear) 重建为 [`MIN_CAPACITY`]；
/// - **错误语义**：越界的索引访问与非法区间追加返回携带稳定错误码的
///   [`BufferError`]，且失败路径不改变缓冲内容。
///
/// # 设计取舍（Trade-offs）
/// - 追加接口不返回 `Result`：扩容失败即分配失败，按全局 OOM 语义处理，
///   可恢复错误仅保留给真正可恢复的场景；
/// - 扩容时仅搬运有效前缀 `[0, len)`，容量尾部的陈旧字节对外不可观测，
///   无需保留。
#[derive(Debug)]
pub struct ByteBuffer {
    storage: BytesMut,
}

impl ByteBuffer {
    /// 以 [`MIN_CAPACITY`] 创建空缓冲。
    pub fn new() -> Self {
        Self {
            storage: BytesMut::with_capacity(MIN_CAPACITY),
        }
    }

    /// 以指定容量创建空缓冲，低于 [`MIN_CAPACITY`] 时按下限分配。
    ///
    /// 适用于已知 token 长度上界的调用方（例如 `\binN` 二进制段），
    /// 可一次性避开增长路径。
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: BytesMut::with_capacity(capacity.max(MIN_CAPACITY)),
        }
    }

    /// 返回有效字节数（逻辑长度）。
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// 判断缓冲是否为空。
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// 返回当前已分配容量，供复用策略与测试观测。
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// 返回有效前缀 `[0, len)` 的只读视图。
    pub fn as_slice(&self) -> &[u8] {
        self.storage.as_ref()
    }

    /// 丢弃全部内容与现有分配，重建为 [`MIN_CAPACITY`] 的空缓冲。
    ///
    /// 与 [`reset`](Self::reset) 的区别在于是否保留底层分配：`clear`
    /// 用于一段解析流程彻底结束后归还大块内存，`reset` 用于 token 之间
    /// 的高频复用。
    pub fn clear(&mut self) {
        self.storage = BytesMut::with_capacity(MIN_CAPACITY);
    }

    /// 将逻辑长度归零但保留已分配容量，供下一个 token 复用。
    pub fn reset(&mut self) {
        self.storage.clear();
    }

    /// 读取索引 `index` 处的字节。
    ///
    /// # 契约说明
    /// - **前置条件**：`index < len()`；
    /// - **错误**：越界时返回 [`codes::BUFFER_INDEX_OUT_OF_RANGE`]，
    ///   缓冲内容不变。
    pub fn get(&self, index: usize) -> Result<u8> {
        self.storage.get(index).copied().ok_or_else(|| {
            BufferError::new(
                codes::BUFFER_INDEX_OUT_OF_RANGE,
                format!("读取越界：index {index}，有效长度 {}", self.storage.len()),
            )
        })
    }

    /// 覆写索引 `index` 处的字节。
    ///
    /// # 契约说明
    /// - **前置条件**：`index < len()`；写入不会扩展逻辑长度；
    /// - **错误**：越界时返回 [`codes::BUFFER_INDEX_OUT_OF_RANGE`]，
    ///   缓冲内容不变。
    pub fn set(&mut self, index: usize, value: u8) -> Result<()> {
        let len = self.storage.len();
        match self.storage.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(BufferError::new(
                codes::BUFFER_INDEX_OUT_OF_RANGE,
                format!("写入越界：index {index}，有效长度 {len}"),
            )),
        }
    }

    /// 追加单个字节，必要时按增长策略扩容。
    pub fn put_u8(&mut self, byte: u8) {
        self.grow_to(self.storage.len() + 1);
        self.storage.put_u8(byte);
    }

    /// 追加整个切片；空切片为无操作。
    pub fn put_slice(&mut self, src: &[u8]) {
        if src.is_empty() {
            return;
        }
        self.grow_to(self.storage.len() + src.len());
        self.storage.extend_from_slice(src);
    }

    /// 从 `src` 的 `[start, start + count)` 窗口复制 `count` 字节到缓冲尾部。
    ///
    /// # 契约说明（What）
    /// - **输入**：`count == 0` 为合法的无操作，直接返回 `Ok(())`；
    /// - **前置条件**：`start + count <= src.len()`（含加法不溢出）；
    /// - **错误**：窗口非法时返回 [`codes::BUFFER_RANGE_OUT_OF_BOUNDS`]，
    ///   缓冲保持逐字节不变；
    /// - **后置条件**：成功后 `len()` 增加 `count`，窗口内容按原顺序位于
    ///   缓冲尾部。
    pub fn put_range(&mut self, src: &[u8], start: usize, count: usize) -> Result<()> {
        if count == 0 {
            return Ok(());
        }
        let window = start
            .checked_add(count)
            .and_then(|end| src.get(start..end))
            .ok_or_else(|| {
                BufferError::new(
                    codes::BUFFER_RANGE_OUT_OF_BOUNDS,
                    format!(
                        "区间越界：start {start}，count {count}，来源长度 {}",
                        src.len()
                    ),
                )
            })?;
        self.grow_to(self.storage.len() + count);
        self.storage.extend_from_slice(window);
        Ok(())
    }

    /// 复制有效字节为独立的 `Vec<u8>`；缓冲为空时返回 `None`。
    ///
    /// `None` 与"零长度数组"是两种不同的信号：上游据此区分"token 没有
    /// 载荷"与"载荷恰好为空"，与解码为空串的路径分开处理。
    pub fn to_array(&self) -> Option<Vec<u8>> {
        if self.storage.is_empty() {
            None
        } else {
            Some(self.storage.to_vec())
        }
    }

    /// 用给定编码将有效字节解码为文本。
    ///
    /// # 契约说明（What）
    /// - 空缓冲直接返回空串，不触碰编码器；
    /// - 非法字节序列的处理完全委托给 `codec` 自身语义，本容器不做任何
    ///   预校验；
    /// - **错误**：原样传出编码器的 [`codes::CODEC_DECODE`] 失败。
    pub fn decode(&self, codec: &dyn TextCodec) -> Result<String> {
        if self.storage.is_empty() {
            return Ok(String::new());
        }
        codec.decode(self.storage.as_ref())
    }

    /// 确保容量不低于 `target`，按 1.5 倍步进扩容。
    ///
    /// 新容量取 `max(target, capacity * 1.5)`：纯按需扩容会让 N 次单字节
    /// 追加退化为 O(N²) 的搬运量，乘性步进将其摊还为 O(N)。
    fn grow_to(&mut self, target: usize) {
        let capacity = self.storage.capacity();
        if target <= capacity {
            return;
        }
        let stepped = capacity + capacity / 2;
        let goal = target.max(stepped);
        // reserve 以"追加空间"计，需扣除当前长度；BytesMut 保证扩容后
        // 有效前缀原样保留。
        self.storage.reserve(goal - self.storage.len());
    }
}

impl Default for ByteBuffer {
    fn default() -> Self {
        Self::new()
    }
}
