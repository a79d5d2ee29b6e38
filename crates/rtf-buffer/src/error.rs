use alloc::borrow::Cow;
use alloc::boxed::Box;
use core::error::Error;
use core::fmt;

/// `BufferError` 是本 crate 对外暴露的统一错误域。
///
/// # 设计背景（Why）
/// - 缓冲层的失败形态有限（索引越界、区间越界、编解码失败），但上游解析器
///   需要稳定的机读标识来区分它们，而不是解析错误文案；
/// - crate 需兼容 `no_std + alloc` 场景，因此基于 [`core::error::Error`]
///   而非 `std` 专属设施构建错误链。
///
/// # 逻辑解析（How）
/// - 错误码 `code` 始终为 `'static` 字符串，遵循 `<域>.<语义>` 命名约定，
///   全部常量集中在 [`codes`] 模块；
/// - `message` 面向排障人员，使用 `Cow` 以同时支持静态文案与动态拼接；
/// - 底层原因通过 [`with_cause`](Self::with_cause) 装箱挂载，经由
///   `source()` 向上暴露完整链路。
///
/// # 契约说明（What）
/// - **前置条件**：调用方必须使用 [`codes`] 模块中的常量构造错误；
/// - **后置条件**：返回值满足 `Send + Sync + 'static`，可安全跨线程传递；
///   除非显式调用 `with_cause`，错误不携带底层原因。
///
/// # 设计取舍（Trade-offs）
/// - 采用 `String` 级消息牺牲极少量堆分配，换取拼接索引、长度等上下文的
///   灵活性；热路径（追加写入）不构造错误，不受影响。
#[derive(Debug)]
pub struct BufferError {
    code: &'static str,
    message: Cow<'static, str>,
    cause: Option<ErrorCause>,
}

/// `ErrorCause` 封装底层原因，保持 `Send + Sync` 以方便跨线程传递。
pub type ErrorCause = Box<dyn Error + Send + Sync + 'static>;

/// `Result` 为本 crate 统一的返回值别名，默认错误类型为 [`BufferError`]。
pub type Result<T, E = BufferError> = core::result::Result<T, E>;

impl BufferError {
    /// 以稳定错误码与描述构造错误。
    ///
    /// # 契约说明
    /// - **输入**：`code` 来自 [`codes`] 模块；`message` 可为静态文案或
    ///   携带上下文的动态字符串；
    /// - **后置条件**：返回的错误不含底层原因，可通过
    ///   [`with_cause`](Self::with_cause) 追加。
    pub fn new(code: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code,
            message: message.into(),
            cause: None,
        }
    }

    /// 附带底层原因并返回新的错误，保持 `source()` 链路可回溯。
    pub fn with_cause(mut self, cause: impl Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// 获取稳定错误码。
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// 获取面向排障人员的描述。
    pub fn message(&self) -> &str {
        &self.message
    }

    /// 获取可选的底层原因。
    pub fn cause(&self) -> Option<&ErrorCause> {
        self.cause.as_ref()
    }
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for BufferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_ref()
            .map(|boxed| boxed.as_ref() as &(dyn Error + 'static))
    }
}

/// 本 crate 的错误码常量集合，确保上游日志与断言具有稳定识别符。
///
/// # 契约说明（What）
/// - 错误码遵循 `<域>.<语义>` 命名约定，`buffer.*` 对应容器自身的契约
///   违规，`codec.*` 对应文本编解码失败；
/// - 码值一经发布即冻结；新增语义必须新增码值，不得复用旧值。
pub mod codes {
    /// 索引读写越过有效长度 `[0, len)`。
    pub const BUFFER_INDEX_OUT_OF_RANGE: &str = "buffer.index_out_of_range";
    /// 区间追加的 `(start, count)` 窗口超出来源切片。
    pub const BUFFER_RANGE_OUT_OF_BOUNDS: &str = "buffer.range_out_of_bounds";
    /// 字节序列对所选编码非法，解码失败。
    pub const CODEC_DECODE: &str = "codec.decode";
    /// 文本含有目标编码无法表示的字符，编码失败。
    pub const CODEC_ENCODE: &str = "codec.encode";
}

const _: fn() = || {
    fn assert_error_traits<T: Error + Send + Sync + 'static>() {}

    assert_error_traits::<BufferError>();
};
