//! 性能指标收集模块
//!
//! 统计最大流计算次数、增广次数和耗时，并导出为 Prometheus 文本格式

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// 系统全局指标
#[derive(Debug)]
pub struct Metrics {
    /// 计算统计
    computation_stats: ComputationStats,
    /// 启动时间
    start_time: Instant,
}

/// 计算统计
#[derive(Debug)]
struct ComputationStats {
    /// 总计算次数
    total: AtomicU64,
    /// 成功次数
    succeeded: AtomicU64,
    /// 失败次数（输入被拒绝或超过增广上限）
    failed: AtomicU64,
    /// 超时次数
    timed_out: AtomicU64,
    /// 增广总次数
    augmentations: AtomicU64,
    /// 总耗时（微秒）
    total_duration_us: AtomicU64,
}

/// 可导出的指标快照
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub total_computations: u64,
    pub succeeded_computations: u64,
    pub failed_computations: u64,
    pub timed_out_computations: u64,
    pub total_augmentations: u64,
    pub avg_augmentations: f64,
    pub avg_duration_ms: f64,
    pub uptime_seconds: u64,
}

/// Prometheus 格式指标
#[derive(Debug, Clone)]
pub struct PrometheusMetrics {
    pub content: String,
}

impl Metrics {
    /// 创建新的指标收集器
    pub fn new() -> Self {
        Self {
            computation_stats: ComputationStats {
                total: AtomicU64::new(0),
                succeeded: AtomicU64::new(0),
                failed: AtomicU64::new(0),
                timed_out: AtomicU64::new(0),
                augmentations: AtomicU64::new(0),
                total_duration_us: AtomicU64::new(0),
            },
            start_time: Instant::now(),
        }
    }

    /// 记录计算开始
    pub fn record_computation_start(&self) -> ComputationTimer {
        self.computation_stats.total.fetch_add(1, Ordering::Relaxed);
        ComputationTimer::new()
    }

    /// 记录计算完成；`augmentations` 为 None 表示失败
    pub fn record_computation_complete(&self, timer: ComputationTimer, augmentations: Option<usize>) {
        let stats = &self.computation_stats;
        match augmentations {
            Some(n) => {
                stats.succeeded.fetch_add(1, Ordering::Relaxed);
                stats.augmentations.fetch_add(n as u64, Ordering::Relaxed);
            }
            None => {
                stats.failed.fetch_add(1, Ordering::Relaxed);
            }
        }
        stats
            .total_duration_us
            .fetch_add(timer.elapsed().as_micros() as u64, Ordering::Relaxed);
    }

    /// 记录超时（结果被丢弃）
    pub fn record_timeout(&self) {
        self.computation_stats.timed_out.fetch_add(1, Ordering::Relaxed);
    }

    /// 获取指标快照
    pub fn snapshot(&self) -> MetricsSnapshot {
        let stats = &self.computation_stats;
        let total = stats.total.load(Ordering::Relaxed);
        let succeeded = stats.succeeded.load(Ordering::Relaxed);
        let augmentations = stats.augmentations.load(Ordering::Relaxed);
        let total_duration_us = stats.total_duration_us.load(Ordering::Relaxed);

        let avg_augmentations = if succeeded > 0 {
            augmentations as f64 / succeeded as f64
        } else {
            0.0
        };

        let avg_duration_ms = if total > 0 {
            (total_duration_us as f64) / (total as f64) / 1000.0
        } else {
            0.0
        };

        MetricsSnapshot {
            total_computations: total,
            succeeded_computations: succeeded,
            failed_computations: stats.failed.load(Ordering::Relaxed),
            timed_out_computations: stats.timed_out.load(Ordering::Relaxed),
            total_augmentations: augmentations,
            avg_augmentations,
            avg_duration_ms,
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// 导出为 Prometheus 格式
    pub fn to_prometheus(&self) -> PrometheusMetrics {
        let snapshot = self.snapshot();

        let mut content = String::new();
        let mut metric = |name: &str, kind: &str, help: &str, value: String| {
            content.push_str(&format!("# HELP flowtrace_{} {}\n", name, help));
            content.push_str(&format!("# TYPE flowtrace_{} {}\n", name, kind));
            content.push_str(&format!("flowtrace_{} {}\n", name, value));
        };

        metric(
            "computations_total",
            "counter",
            "Total number of max-flow computations",
            snapshot.total_computations.to_string(),
        );
        metric(
            "computations_succeeded_total",
            "counter",
            "Number of successful computations",
            snapshot.succeeded_computations.to_string(),
        );
        metric(
            "computations_failed_total",
            "counter",
            "Number of rejected or capped computations",
            snapshot.failed_computations.to_string(),
        );
        metric(
            "computations_timed_out_total",
            "counter",
            "Number of computations discarded after the request deadline",
            snapshot.timed_out_computations.to_string(),
        );
        metric(
            "augmentations_total",
            "counter",
            "Total augmenting paths applied",
            snapshot.total_augmentations.to_string(),
        );
        metric(
            "computation_duration_avg_ms",
            "gauge",
            "Average computation duration in milliseconds",
            format!("{:.2}", snapshot.avg_duration_ms),
        );
        metric(
            "uptime_seconds",
            "counter",
            "System uptime in seconds",
            snapshot.uptime_seconds.to_string(),
        );

        PrometheusMetrics { content }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// 计算计时器
pub struct ComputationTimer {
    start: Instant,
}

impl ComputationTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// 全局指标实例
static METRICS: once_cell::sync::Lazy<Arc<Metrics>> =
    once_cell::sync::Lazy::new(|| Arc::new(Metrics::new()));

/// 获取全局指标实例
pub fn global_metrics() -> Arc<Metrics> {
    METRICS.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_snapshot() {
        let metrics = Metrics::new();

        let timer = metrics.record_computation_start();
        std::thread::sleep(Duration::from_millis(10));
        metrics.record_computation_complete(timer, Some(3));

        let timer = metrics.record_computation_start();
        metrics.record_computation_complete(timer, None);
        metrics.record_timeout();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.total_computations, 2);
        assert_eq!(snapshot.succeeded_computations, 1);
        assert_eq!(snapshot.failed_computations, 1);
        assert_eq!(snapshot.timed_out_computations, 1);
        assert_eq!(snapshot.total_augmentations, 3);
        assert_eq!(snapshot.avg_augmentations, 3.0);
        assert!(snapshot.avg_duration_ms >= 5.0);
    }

    #[test]
    fn test_prometheus_export() {
        let metrics = Metrics::new();
        let timer = metrics.record_computation_start();
        metrics.record_computation_complete(timer, Some(2));

        let prom = metrics.to_prometheus();
        assert!(prom.content.contains("flowtrace_computations_total 1"));
        assert!(prom.content.contains("flowtrace_augmentations_total 2"));
        assert!(prom.content.contains("# TYPE flowtrace_uptime_seconds counter"));
    }
}
