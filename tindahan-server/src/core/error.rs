use thiserror::Error;

/// 服务器级错误 — 启动/运行阶段的致命失败
///
/// 请求级错误走 [`crate::utils::AppError`]；这里只覆盖无法继续服务的情况。
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("数据库初始化失败: {0}")]
    Database(String),

    #[error("配置错误: {0}")]
    Config(String),

    #[error("内部服务器错误")]
    Internal(#[from] anyhow::Error),
}

/// 服务器启动阶段的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
