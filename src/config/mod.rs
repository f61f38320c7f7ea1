//! 应用配置
//!
//! 配置来源（优先级由低到高）：`config.toml`、`config.{APP_ENV}.toml`、
//! `CLASSWORK_*` 环境变量，以及若干常用环境变量的显式覆盖。

mod r#impl;
mod structs;

pub use structs::*;
