//! Tindahan Store Server - 多租户门店管理后端
//!
//! # 架构概述
//!
//! 本模块是门店节点的主入口，提供以下核心功能：
//!
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储 + 店铺范围 repository
//! - **认证** (`auth`): JWT 校验 + owner 角色检查 (令牌签发在外部)
//! - **HTTP API** (`api`): 商品 / 订单 / 支出 / 流水 / 报表接口
//! - **账本** : 订单与支出镜像为只追加的 transaction 流水，
//!   库存扣减与双文档写入在同一存储事务内完成
//! - **报表** (`reports`): 时间窗口聚合与库存重建
//!
//! # 模块结构
//!
//! ```text
//! tindahan-server/src/
//! ├── core/          # 配置、状态、错误
//! ├── auth/          # JWT 认证、角色
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (models + repository)
//! ├── money/         # Decimal 金额计算
//! ├── reports/       # 仪表盘聚合、库存重建
//! └── utils/         # 错误、日志等工具
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod money;
pub mod reports;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    // .env 缺失不算错误
    let _ = dotenv::dotenv();

    init_logger();

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
  ______ _             __      __
 /_  __/(_)___  ____/ /___ _ / /_  ____ _ ____
  / /  / // __ \/ __  // __ `// __ \/ __ `// __ \
 / /  / // / / / /_/ // /_/ // / / / /_/ // / / /
/_/  /_//_/ /_/\__,_/ \__,_//_/ /_/\__,_//_/ /_/
    "#
    );
}
