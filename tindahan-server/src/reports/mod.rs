//! 报表模块 - 从订单/支出/商品推导的只读分析
//!
//! # 结构
//!
//! - [`timeframe`] - 日历对齐的报表时间窗口
//! - [`chart`] - 销售图表固定分桶
//! - [`dashboard`] - 收入/支出/结余 + 畅销榜聚合
//! - [`inventory`] - 历史库存重建
//!
//! 引擎函数接收显式的 `now` 和业务时区，纯计算部分与存储访问分离，
//! 单元测试直接驱动纯函数。

pub mod chart;
pub mod dashboard;
pub mod inventory;
pub mod timeframe;

pub use chart::{ChartPoint, chart_data};
pub use dashboard::{BestSeller, DashboardReport, build_dashboard, top_best_sellers};
pub use inventory::{InventoryLine, build_inventory, reconstruct_lines, stock_status};
pub use timeframe::Timeframe;
