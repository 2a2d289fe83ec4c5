// error.rs
// 定义项目通用的错误类型（如IO、参数校验、线程池、配置等）和Result类型。
use std::fmt;
use std::io;

/// 项目通用错误类型，涵盖IO、参数校验、线程池、配置等错误
#[derive(Debug)]
pub enum Error {
    /// IO错误
    Io(io::Error),
    /// 无效参数（如奇数长度输入、并行度为0等前置条件违反）
    InvalidArgument(String),
    /// 线程池构建相关错误
    PoolError(rayon::ThreadPoolBuildError),
    /// 配置加载或校验错误
    ConfigError(String),
    /// 其他类型错误
    Other(String),
}

/// 通用结果类型
pub type Result<T> = std::result::Result<T, Error>;

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(e: rayon::ThreadPoolBuildError) -> Self {
        Error::PoolError(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "IO错误: {}", e),
            Error::InvalidArgument(msg) => write!(f, "无效参数: {}", msg),
            Error::PoolError(e) => write!(f, "线程池错误: {}", e),
            Error::ConfigError(msg) => write!(f, "配置错误: {}", msg),
            Error::Other(msg) => write!(f, "其他错误: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
