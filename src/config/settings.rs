// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::services::scan_monitor_service::ScanMonitorConfig;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 覆盖 internet.nl API 地址的独立环境变量
pub const API_URL_ENV_VAR: &str = "INTERNET_NL_API_URL";

/// 应用程序配置设置
///
/// 包含数据库、服务器、扫描调度与指标导出等配置项
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 数据库配置
    pub database: DatabaseSettings,
    /// 服务器配置
    pub server: ServerSettings,
    /// 扫描监控与调度配置
    pub scanning: ScanningSettings,
    /// 指标配置
    pub metrics: MetricsSettings,
}

/// 数据库配置设置
#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
}

/// 服务器配置设置
#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 扫描配置设置
#[derive(Debug, Deserialize)]
pub struct ScanningSettings {
    /// internet.nl 批量接口地址，用于拼接状态页链接
    pub internet_nl_api_url: String,
    /// 扫描监控返回的最大条数（上限 30）
    pub monitor_limit: u64,
    /// 调度器检查间隔（秒）
    pub schedule_interval_secs: u64,
    /// 是否在本实例运行调度器
    pub scheduler_enabled: bool,
}

/// 指标配置设置
#[derive(Debug, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用 Prometheus 导出
    pub enabled: bool,
    /// 导出端口监听地址
    pub listen_addr: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加默认值、`config/default`、`config/{APP_ENVIRONMENT}` 与 `SCANMON__*` 环境变量，
    /// 最后由 `INTERNET_NL_API_URL` 覆盖 API 地址
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Self::with_defaults(Config::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("SCANMON").separator("__"));

        let mut settings: Settings = builder.build()?.try_deserialize()?;
        settings.apply_api_url_override(std::env::var(API_URL_ENV_VAR).ok());
        Ok(settings)
    }

    /// 默认配置值
    pub fn with_defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("database.url", "sqlite://scanmon.db?mode=rwc")?
            .set_default("database.max_connections", 20)?
            .set_default("database.min_connections", 1)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            .set_default(
                "scanning.internet_nl_api_url",
                "https://batch.internet.nl/api/batch/v2",
            )?
            .set_default("scanning.monitor_limit", 30)?
            .set_default("scanning.schedule_interval_secs", 60)?
            .set_default("scanning.scheduler_enabled", true)?
            .set_default("metrics.enabled", true)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")
    }

    /// 非空时使用独立环境变量中的 API 地址
    pub fn apply_api_url_override(&mut self, value: Option<String>) {
        if let Some(url) = value.filter(|url| !url.trim().is_empty()) {
            self.scanning.internet_nl_api_url = url;
        }
    }

    /// 扫描监控服务配置
    pub fn scan_monitor_config(&self) -> ScanMonitorConfig {
        ScanMonitorConfig::new(
            self.scanning.internet_nl_api_url.clone(),
            self.scanning.monitor_limit,
        )
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
